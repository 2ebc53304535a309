use std::path::PathBuf;

pub mod bucket;
pub mod cli;
pub mod picker;
pub mod scheduler;
pub mod setter;
pub mod validate;

pub use bucket::{clock_value, Clock, FixedClock, LocalClock, TimeBucket};
pub use cli::{parse_invocation, usage, Args, ExitStatus, Invocation};
pub use picker::{has_image_extension, is_image_file, pick_image, IMAGE_EXTENSIONS};
pub use scheduler::{Scheduler, StopSignal, Tick, DEFAULT_SLIDESHOW_SECS};
pub use setter::{native_setter, validate_command, BackgroundSetter, CommandSetter, RecordingSetter};
pub use validate::{validate_base_directory, BaseDirectory};

#[derive(Debug, thiserror::Error)]
pub enum ShufflerError {
    #[error("Base directory {0:?} does not exist or is not a directory.")]
    BaseDirectoryMissing(PathBuf),

    #[error("Missing subfolder \"{0}\".")]
    MissingSubfolder(String),

    #[error("No file in subfolder \"{0}\".")]
    EmptySubfolder(String),

    #[error("No valid image in subfolder \"{0}\". Recognized extensions are png, jpg, jpeg and bmp.")]
    NoValidImage(String),

    #[error("Failed to read directory {path:?}: {source}")]
    DirectoryRead {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Command execution failed: {0}")]
    CommandExecution(String),

    #[error("Desktop shell rejected the wallpaper: {0}")]
    Platform(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShufflerError>;
