use std::path::PathBuf;

/// Where job files go and how sushi_fabric is run
#[derive(Debug, Clone)]
pub struct Config {
    /// Job directories are created under this path, one per job name
    pub scratch_path: PathBuf,
    /// Sushi installation, the working directory of `bundle exec`
    pub app_dir: Option<PathBuf>,
    pub mango_run_name: String,
    /// Stage files and record the job, but don't run sushi_fabric
    pub dry_run: bool,
    /// Refuse to submit forms with warnings
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            scratch_path: PathBuf::from("/scratch/sushi_runner"),
            app_dir: None,
            mango_run_name: String::from("None"),
            dry_run: false,
            strict: false,
        }
    }
}
