use std::{fs, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use crate::{constant::ROW_HEIGHT, explorer::FilterSet};

#[derive(Parser, Debug)]
#[command(
    name = "fileselector",
    version,
    about = "Pick a file from a full-screen list and print its path"
)]
pub struct Args {
    /// Start in DIRECTORY instead of the current directory
    #[arg(short = 'd', long = "directory", value_name = "DIRECTORY", value_parser = parse_directory)]
    pub directory: Option<PathBuf>,

    /// Only show files with these extensions, e.g. `png,jpg`
    #[arg(short = 'f', long = "filter", value_name = "EXT", value_delimiter = ',')]
    pub filter: Vec<String>,

    /// Terminal lines per list row; 1 drops the grid lines
    #[arg(
        long,
        value_name = "CELLS",
        default_value_t = ROW_HEIGHT,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub row_height: u16,
}

/// Start-up settings handed to the picker.
#[derive(Debug, Clone)]
pub struct Config {
    pub start_dir: PathBuf,
    pub filters: FilterSet,
    pub row_height: u16,
}

impl Args {
    pub fn into_config(self) -> Result<Config> {
        let start_dir = match self.directory {
            Some(dir) => dir,
            None => std::env::current_dir().wrap_err("cannot determine current directory")?,
        };
        let start_dir = fs::canonicalize(&start_dir)
            .wrap_err_with(|| format!("cannot resolve {}", start_dir.display()))?;

        Ok(Config {
            start_dir,
            filters: FilterSet::from_extensions(&self.filter),
            row_height: self.row_height,
        })
    }
}

fn parse_directory(value: &str) -> Result<PathBuf, String> {
    fs::read_dir(value)
        .map(|_| PathBuf::from(value))
        .map_err(|error| format!("specified directory path is invalid: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn defaults_to_current_directory_without_filter() {
        let config = Args::try_parse_from(["fileselector"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(
            config.start_dir,
            fs::canonicalize(std::env::current_dir().unwrap()).unwrap()
        );
        assert!(config.filters.is_empty());
        assert_eq!(config.row_height, ROW_HEIGHT);
    }

    #[test]
    fn filter_list_is_split_and_dotted() {
        let args = Args::try_parse_from(["fileselector", "-f", "png,jpg"]).unwrap();
        let config = args.into_config().unwrap();
        assert_eq!(config.filters.suffixes(), [".png", ".jpg"]);
    }

    #[test]
    fn directory_must_exist() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("missing");
        let error =
            Args::try_parse_from(["fileselector", "-d", missing.to_str().unwrap()]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueValidation);

        let args = Args::try_parse_from(["fileselector", "-d", root.path().to_str().unwrap()])
            .unwrap();
        let config = args.into_config().unwrap();
        assert_eq!(config.start_dir, fs::canonicalize(root.path()).unwrap());
    }

    #[test]
    fn flags_need_a_value() {
        for argv in [
            vec!["fileselector", "-d"],
            vec!["fileselector", "-f"],
            vec!["fileselector", "-f", "-d", "."],
        ] {
            assert!(Args::try_parse_from(argv).is_err());
        }
    }

    #[test]
    fn row_height_must_be_positive() {
        assert!(Args::try_parse_from(["fileselector", "--row-height", "0"]).is_err());
        let args = Args::try_parse_from(["fileselector", "--row-height", "1"]).unwrap();
        assert_eq!(args.row_height, 1);
    }

    #[test]
    fn stray_arguments_are_rejected() {
        let error = Args::try_parse_from(["fileselector", "somewhere"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnknownArgument);
    }
}
