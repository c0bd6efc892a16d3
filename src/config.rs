/*
 * Application configuration
 *
 */
use std::fs;
use std::fs::File;
use std::io::Write;
use toml;
use std::path::{Path, PathBuf};
use failure::Error;
use std::fmt;
use directories::{ProjectDirs, BaseDirs};
use time;

use super::error::CollectorError;

// command line arguments, handed over by the binary's option parser
#[derive(Default)]
pub struct Args {
    pub flag_verbose: bool,
    pub flag_debug: bool,
    pub flag_conf: Option<PathBuf>,
    pub flag_key_file: Option<PathBuf>,
    pub flag_input: Option<PathBuf>,
    pub flag_output: Option<PathBuf>,
}

// serde structures defining the configuration file structure
#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
    #[serde(rename = "files")]
    pub files: Files,
    #[serde(rename = "parameters")]
    pub params: Parameters,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Files {
    pub api_key: PathBuf,
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Files {
    fn default() -> Self {
        Self {
            api_key: PathBuf::from("youtube_api_key.txt"),
            input: PathBuf::from("video_links.csv"),
            output_dir: PathBuf::from("results"),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub api_endpoint: String,
    pub user_agent: String,
    pub timeout_s: u64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            api_endpoint: "https://www.googleapis.com/youtube/v3/videos".to_string(),
            user_agent: "youtube-metrics-collector/0.2.0".to_string(),
            timeout_s: 10,
        }
    }
}

impl Conf {
    // load configuration TOML from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let conf = fs::read_to_string(path.as_ref())?;
        let conf: Conf = toml::de::from_str(&conf)?;
        Ok(conf)
    }

    // write configuration to a file
    pub fn write(self, path: impl AsRef<Path>) -> Result<(), Error> {
        let mut file = File::create(path)?;
        file.write_all(toml::ser::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

// run time data structure. this is used to pass around runtime data
// where it's needed, including command line arguments, configuration
// file settings, and the file paths resolved from both sources
#[derive(Default)]
pub struct Rtd {
    // paths
    pub paths: Paths,
    // configuration file data
    pub conf: Conf,
    // command-line arguments
    pub args: Args,
}

#[derive(Default)]
pub struct Paths {
    pub conf: PathBuf,
    pub api_key: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Rtd {
    pub fn from_args(args: Args) -> Result<Self, Error> {
        let mut rtd = Rtd::default();

        // move command line arguments
        rtd.args = args;

        // get a config file path
        rtd.paths.conf = match rtd.args.flag_conf {
            // configuration file path specified as command line parameter
            Some(ref cp) => expand_tilde(cp),
            // default path
            _ => {
                let dirs = ProjectDirs::from("org", "", "youtube-metrics-collector").unwrap();
                dirs.config_dir().join("config.toml")
            },
        };

        // check if config directory exists, create it if it doesn't
        create_dir_if_missing(rtd.paths.conf.parent().unwrap())?;

        // create a default config if it doesn't exist
        if !rtd.paths.conf.exists() {
            eprintln!(
                "Configuration `{}` doesn't exist, creating default",
                rtd.paths.conf.to_str().unwrap()
            );
            Conf::default().write(&rtd.paths.conf)?;
        }

        // load config file
        rtd.conf = Conf::load(&rtd.paths.conf)?;

        // resolve file paths, command line arguments take precedence
        rtd.paths.api_key = match rtd.args.flag_key_file {
            Some(ref path) => expand_tilde(path),
            _ => expand_tilde(&rtd.conf.files.api_key),
        };
        rtd.paths.input = match rtd.args.flag_input {
            Some(ref path) => expand_tilde(path),
            _ => expand_tilde(&rtd.conf.files.input),
        };
        rtd.paths.output = match rtd.args.flag_output {
            Some(ref path) => expand_tilde(path),
            _ => expand_tilde(&rtd.conf.files.output_dir).join(default_output_name()?),
        };

        Ok(rtd)
    }
}

/// Read the API key from a text file holding only the key itself.
/// Surrounding whitespace is stripped; a missing or empty file is a
/// configuration error.
pub fn read_api_key(path: &Path) -> Result<String, Error> {
    let contents = fs::read_to_string(path).map_err(|err| {
        CollectorError::new(format!(
            "could not read API key file `{}`: {}", path.display(), err
        ))
    })?;
    let api_key = contents.trim();
    if api_key.is_empty() {
        return Err(CollectorError::new(format!(
            "API key file `{}` is empty", path.display()
        )).into());
    }
    Ok(api_key.to_string())
}

// one output file per run
fn default_output_name() -> Result<String, Error> {
    let stamp = time::strftime("%Y%m%d_%H%M%S", &time::now())?;
    Ok(format!("youtube_metrics_output_{}.csv", stamp))
}

// implementation of Display trait for multiple structs above
macro_rules! impl_display {
    ($($t:ty),+) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", toml::ser::to_string(self).unwrap())
            }
        })+
    }
}
impl_display!(Files, Parameters);

pub fn create_dir_if_missing(dir: &Path) -> Result<bool, Error> {
    let pdir = dir.to_str().unwrap();
    let exists = pdir.is_empty() || dir.exists();
    if !exists {
        eprintln!("Directory `{}` doesn't exist, creating it", pdir);
        fs::create_dir_all(dir)?;
    }
    Ok(exists)
}

fn expand_tilde(path: &Path) -> PathBuf {
    match (BaseDirs::new(), path.strip_prefix("~")) {
        (Some(bd), Ok(stripped)) => bd.home_dir().join(stripped),
        _ => path.to_owned(),
    }
}
