/// Print a standardized warning line to stderr (color-aware).
pub fn warn_print(msg: &str) {
    let use_err = crate::color_enabled_stderr();
    crate::log_warn_stderr(use_err, &format!("warning: {msg}"));
}
