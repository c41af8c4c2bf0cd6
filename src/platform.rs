use std::env;
use std::path::{Path, PathBuf};

#[cfg(all(unix, not(target_os = "macos")))]
const UNIX_PLAYERS: &[&str] = &["vlc", "mpv", "mplayer", "xdg-open"];

/// Look up an executable by name on `PATH`.
pub fn find_in_path(program: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Launch the platform's media player on `path` without waiting for it.
/// Returns the player that was started.
pub fn play_video<P: AsRef<Path>>(path: P) -> Result<String, String> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(format!("Video file not found: {}", path.display()));
    }
    launch(path)
}

#[cfg(target_os = "windows")]
fn launch(path: &Path) -> Result<String, String> {
    std::process::Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(path)
        .spawn()
        .map_err(|e| format!("Failed to start default player: {}", e))?;
    Ok("default player".to_string())
}

#[cfg(target_os = "macos")]
fn launch(path: &Path) -> Result<String, String> {
    std::process::Command::new("open")
        .arg(path)
        .spawn()
        .map_err(|e| format!("Failed to run open: {}", e))?;
    Ok("open".to_string())
}

#[cfg(all(unix, not(target_os = "macos")))]
fn launch(path: &Path) -> Result<String, String> {
    let player = UNIX_PLAYERS
        .iter()
        .copied()
        .find(|p| find_in_path(p).is_some())
        .ok_or_else(|| {
            format!(
                "No video player found. Install one of: {}",
                UNIX_PLAYERS.join(", ")
            )
        })?;
    std::process::Command::new(player)
        .arg(path)
        .spawn()
        .map_err(|e| format!("Failed to start {}: {}", player, e))?;
    Ok(player.to_string())
}

#[cfg(not(any(windows, unix)))]
fn launch(_path: &Path) -> Result<String, String> {
    Err("Video playback is not supported on this platform".to_string())
}
