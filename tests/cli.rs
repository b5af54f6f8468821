//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use assert_cmd::Command;

    #[test]
    fn prints_version() {
        let out = Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .arg("-V")
            .output()
            .unwrap();

        assert_eq!(
            String::from_utf8_lossy(&out.stdout),
            format!("{} {}\n", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn prepare_reads_stdin() {
        let out = Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .args(["prepare", "-"])
            .write_stdin("<h4>X</h4>")
            .output()
            .unwrap();

        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "<h2>X</h2>");
    }

    #[test]
    fn prepare_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("post.html");
        std::fs::write(&input, r#"<div class="wrap"><p>A</p></div>"#).unwrap();

        let out = Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .arg("prepare")
            .arg(&input)
            .output()
            .unwrap();

        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "<p>A</p>");
    }

    #[test]
    fn prepare_strips_scripts() {
        let out = Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .args(["prepare", "-"])
            .write_stdin("<p>a<script>x()</script></p>")
            .output()
            .unwrap();

        assert!(out.status.success());
        assert!(!String::from_utf8_lossy(&out.stdout).contains("script"));
    }

    #[test]
    fn markdown_renders_stdin() {
        let out = Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .args(["markdown", "-"])
            .write_stdin("<h1>T</h1><p>Hello <strong>World</strong></p>")
            .output()
            .unwrap();

        assert!(out.status.success());
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.contains("# T"));
        assert!(stdout.contains("**World**"));
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use assert_cmd::Command;

    #[test]
    fn requires_a_subcommand() {
        let out = Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .output()
            .unwrap();

        assert!(!out.status.success());
    }

    #[test]
    fn missing_input_file_reports_an_error() {
        let out = Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .args(["prepare", "/definitely/missing.html"])
            .output()
            .unwrap();

        assert_eq!(out.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&out.stderr).contains("Error:"));
    }

    #[test]
    fn translate_needs_an_api_key() {
        let dir = tempfile::tempdir().unwrap();

        let out = Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .current_dir(dir.path())
            .env_remove("MEDIUMPRESS_API_KEY")
            .env_remove("ANTHROPIC_API_KEY")
            .args(["translate", "-"])
            .write_stdin("<p>Hallo Welt</p>")
            .output()
            .unwrap();

        assert_eq!(out.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&out.stderr).contains("No API key configured"));
    }

    #[test]
    fn validate_key_needs_an_api_key() {
        let dir = tempfile::tempdir().unwrap();

        let out = Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .current_dir(dir.path())
            .env_remove("MEDIUMPRESS_API_KEY")
            .env_remove("ANTHROPIC_API_KEY")
            .arg("validate-key")
            .output()
            .unwrap();

        assert_eq!(out.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&out.stderr).contains("API key"));
    }
}
