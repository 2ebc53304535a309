use crate::{Result, ShufflerError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Applies an image file as the desktop background.
pub trait BackgroundSetter {
    fn set_background(&mut self, path: &Path) -> Result<()>;
}

impl<S: BackgroundSetter + ?Sized> BackgroundSetter for Box<S> {
    fn set_background(&mut self, path: &Path) -> Result<()> {
        (**self).set_background(path)
    }
}

pub fn validate_command(command: &str) -> Result<()> {
    if command.trim().is_empty() {
        return Err(ShufflerError::CommandExecution("Empty command".to_owned()));
    }
    Ok(())
}

/// Runs an external program with the image path appended, e.g. `feh --bg-max`.
#[derive(Debug, Clone)]
pub struct CommandSetter {
    command: String,
}

impl CommandSetter {
    pub fn new(command: impl Into<String>) -> Result<Self> {
        let command = command.into();
        validate_command(&command)?;
        Ok(Self { command })
    }
}

impl BackgroundSetter for CommandSetter {
    fn set_background(&mut self, path: &Path) -> Result<()> {
        let command_parts: Vec<&str> = self.command.split_whitespace().collect();
        let Some((program, leading_args)) = command_parts.split_first() else {
            return Err(ShufflerError::CommandExecution("Empty command".to_owned()));
        };

        let output = Command::new(program)
            .args(leading_args)
            .arg(path)
            .output()
            .map_err(|e| ShufflerError::CommandExecution(e.to_string()))?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(ShufflerError::CommandExecution(error_msg.into_owned()));
        }

        Ok(())
    }
}

/// Remembers every path it was asked to apply instead of touching the desktop.
#[derive(Debug, Default, Clone)]
pub struct RecordingSetter {
    pub applied: Vec<PathBuf>,
}

impl BackgroundSetter for RecordingSetter {
    fn set_background(&mut self, path: &Path) -> Result<()> {
        self.applied.push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(windows)]
mod windows_shell {
    use super::BackgroundSetter;
    use crate::{Result, ShufflerError};
    use std::ffi::c_void;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;
    use windows::Win32::UI::WindowsAndMessaging::{
        SystemParametersInfoW, SPIF_SENDWININICHANGE, SPI_SETDESKWALLPAPER,
    };

    /// `SystemParametersInfoW(SPI_SETDESKWALLPAPER, 0, path, SPIF_SENDWININICHANGE)`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct WindowsSetter;

    impl BackgroundSetter for WindowsSetter {
        fn set_background(&mut self, path: &Path) -> Result<()> {
            let mut wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();
            unsafe {
                SystemParametersInfoW(
                    SPI_SETDESKWALLPAPER,
                    0,
                    Some(wide.as_mut_ptr() as *mut c_void),
                    SPIF_SENDWININICHANGE,
                )
            }
            .map_err(|e| ShufflerError::Platform(e.to_string()))
        }
    }
}

#[cfg(windows)]
pub use windows_shell::WindowsSetter;

/// The desktop shell binding for this platform, if there is one.
pub fn native_setter() -> Option<Box<dyn BackgroundSetter>> {
    #[cfg(windows)]
    {
        Some(Box::new(WindowsSetter))
    }
    #[cfg(not(windows))]
    {
        None
    }
}
