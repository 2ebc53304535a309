use background_shuffler::TimeBucket;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn shuffler(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_background-shuffler"))
        .args(args)
        .output()
        .expect("failed to launch background-shuffler")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn create_base_directory(base: &Path) {
    for bucket in TimeBucket::ALL {
        let folder = base.join(bucket.folder_name());
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join(format!("{}.png", bucket.folder_name())), [0x89, 0x50, 0x4E, 0x47]).unwrap();
    }
}

#[cfg(test)]
mod exit_code_tests {
    use super::*;

    #[test]
    fn test_help_exits_zero_with_usage() {
        for flag in ["-h", "--help"] {
            let output = shuffler(&[flag]);
            assert_eq!(output.status.code(), Some(0));
            let stdout = stdout_of(&output);
            assert!(stdout.contains("-p <base_directory> -t <slideshow time>"));
            assert!(stdout.contains("--PATH=<base_directory> --TIME=<slideshow time>"));
        }
    }

    #[test]
    fn test_help_skips_further_processing() {
        let output = shuffler(&["-h", "-p", "/definitely/not/here"]);
        assert_eq!(output.status.code(), Some(0));
        assert!(!stdout_of(&output).contains("Base directory"));
    }

    #[test]
    fn test_parse_failure_exits_two() {
        let output = shuffler(&["-p", "/tmp", "-t", "later"]);
        assert_eq!(output.status.code(), Some(2));
        assert!(stdout_of(&output).contains("Usage"));

        let output = shuffler(&["--unknown-flag"]);
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_empty_command_exits_two() {
        let temp_dir = TempDir::new().unwrap();
        create_base_directory(temp_dir.path());
        let path = temp_dir.path().to_string_lossy().into_owned();

        let output = shuffler(&["-p", &path, "-c", "  "]);
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_missing_path_exits_three() {
        let output = shuffler(&["-t", "5"]);
        assert_eq!(output.status.code(), Some(3));
        let stdout = stdout_of(&output);
        assert!(stdout.contains("Missing options."));
        assert!(stdout.contains("Usage"));
    }

    #[test]
    fn test_empty_path_exits_three() {
        let output = shuffler(&["-p", "", "-c", "true"]);
        assert_eq!(output.status.code(), Some(3));
        assert!(stdout_of(&output).contains("Missing options."));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_unsupported_platform_exits_one() {
        let temp_dir = TempDir::new().unwrap();
        create_base_directory(temp_dir.path());
        let path = temp_dir.path().to_string_lossy().into_owned();

        let output = shuffler(&["-p", &path]);
        assert_eq!(output.status.code(), Some(1));
        assert!(stdout_of(&output).contains("only support Windows"));
    }

    #[cfg(unix)]
    #[test]
    fn test_invalid_base_directory_exits_four() {
        let temp_dir = TempDir::new().unwrap();
        create_base_directory(temp_dir.path());
        fs::remove_dir_all(temp_dir.path().join("dusk")).unwrap();
        let path = temp_dir.path().to_string_lossy().into_owned();

        let output = shuffler(&["-p", &path, "-c", "true"]);
        assert_eq!(output.status.code(), Some(4));
        let stdout = stdout_of(&output);
        assert!(stdout.contains("Missing subfolder \"dusk\"."));
        assert!(stdout.contains("Base directory doesn't meet requirements."));
    }
}

#[cfg(test)]
mod end_to_end_tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_bounded_run_with_external_command() {
        let temp_dir = TempDir::new().unwrap();
        create_base_directory(temp_dir.path());
        let path = temp_dir.path().to_string_lossy().into_owned();

        let output = shuffler(&["-p", &path, "-t", "0", "-c", "true", "-n", "3"]);
        assert_eq!(output.status.code(), Some(0));

        let stdout = stdout_of(&output);
        assert_eq!(stdout.lines().filter(|l| l.starts_with("Time: ")).count(), 3);

        let valid: Vec<&str> = stdout
            .lines()
            .filter_map(|l| l.strip_prefix("found valid image: "))
            .collect();
        assert_eq!(valid.len(), 3);
        assert!(valid.iter().all(|name| name.ends_with(".png")));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_receives_image_from_bucket_folder() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("backgrounds");
        let work = temp_dir.path().join("work");
        create_base_directory(&base);
        fs::create_dir_all(&work).unwrap();
        let path = base.to_string_lossy().into_owned();

        // `ln -s <image>` leaves a link named after the image in the working directory.
        let output = Command::new(env!("CARGO_BIN_EXE_background-shuffler"))
            .args(["-p", path.as_str(), "-t", "0", "-c", "ln -s", "-n", "1"])
            .current_dir(&work)
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(0));

        let links: Vec<_> = fs::read_dir(&work).unwrap().map(|e| e.unwrap().path()).collect();
        assert_eq!(links.len(), 1);
        let applied = fs::read_link(&links[0]).unwrap();
        assert!(applied.is_absolute());
        assert!(applied.starts_with(&base));

        let folder = applied.parent().unwrap().file_name().unwrap().to_string_lossy().into_owned();
        assert!(TimeBucket::ALL.iter().any(|b| b.folder_name() == folder));
        assert_eq!(applied.file_name().unwrap().to_string_lossy(), format!("{folder}.png"));
    }
}
