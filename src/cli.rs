use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory the feed (`peps.rss`) is written to
    #[arg(value_name = "DIR", value_parser = existing_dir)]
    pub output_dir: PathBuf,

    /// Directory to scan for `pep-*.txt` and `pep-*.rst` [default: current directory]
    #[arg(long, value_name = "DIR", value_parser = existing_dir)]
    pub source: Option<PathBuf>,

    /// More logging; repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn source_dir(&self) -> PathBuf {
        self.source.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

fn existing_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("not a directory: {s}"))
    }
}

/// Log to stderr. `RUST_LOG` overrides the `-v` level.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match verbose {
        0 => "pep2rss=warn",
        1 => "pep2rss=info",
        _ => "pep2rss=debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn existing_dir_accepts_directories() {
        let dir = tempdir().expect("tmp dir");
        let parsed = existing_dir(dir.path().to_str().unwrap()).expect("parse");
        assert_eq!(parsed, dir.path());
    }

    #[test]
    fn existing_dir_rejects_files() {
        let file = tempfile::NamedTempFile::new().expect("tmp file");
        let err = existing_dir(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.starts_with("not a directory"));
    }

    #[test]
    fn existing_dir_rejects_missing_paths() {
        proptest::proptest!(|(s in "[A-Za-z0-9._-]{1,32}")| {
            proptest::prop_assume!(!PathBuf::from(&s).exists());
            proptest::prop_assert!(existing_dir(&s).is_err());
        })
    }

    #[test]
    fn source_defaults_to_current_directory() {
        let dir = tempdir().expect("tmp dir");
        let out = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["pep2rss", out]).expect("parse");
        assert_eq!(cli.source_dir(), PathBuf::from("."));
        assert_eq!(cli.verbose, 0);

        let cli = Cli::try_parse_from(["pep2rss", "-vv", "--source", out, out]).expect("parse");
        assert_eq!(cli.source_dir(), dir.path());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn output_dir_is_required() {
        assert!(Cli::try_parse_from(["pep2rss"]).is_err());
    }
}
