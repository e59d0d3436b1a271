use std::process::Command;

#[macro_export]
macro_rules! print_result_err {
    ($context:expr, $result:expr $(,)?) => {{
        if let Err(err) = $result {
            log::error!("[{}:{}] Error {}: {:?}", ::std::file!(), ::std::line!(), $context, err);
        }
    }};
}

/// Spawn a shell command without waiting for it. Used by the button,
/// playerctl and controls modules, which must never block the main loop.
pub fn spawn_command(cmd: &str) {
    log::debug!("Running command from module: {}", cmd);
    if let Err(err) = Command::new("/bin/sh").arg("-c").arg(cmd).spawn() {
        log::error!("Failed to launch command '{}': {}", cmd, err);
    }
}

/// Shorten a task title for display in the taskbar.
pub fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", truncated)
}

#[cfg(test)]
mod test {
    use super::ellipsize;

    #[test]
    fn test_ellipsize() {
        assert_eq!("firefox", ellipsize("firefox", 10));
        assert_eq!("a long wi…", ellipsize("a long window title", 10));
        assert_eq!("", ellipsize("", 10));
    }
}
