/// # Examples
/// ```
/// use treegrid_engine::common::log_format::LogFormat;
///
/// let fn_message = LogFormat::call("EditorSession", "toggle_expand", &["'row-1'".to_string()]);
/// assert_eq!(fn_message, "EditorSession::toggle_expand('row-1')");
/// ```
pub struct LogFormat;

impl LogFormat {

    pub fn call(class: &str, fn_name: &str, args: &[String]) -> String {
        let args_str = args.join(", ");
        format!("{}::{}({})", class, fn_name, args_str)
    }

    pub fn message(class: &str, fn_name: &str, message: &str) -> String {
        format!("{}::{}: {}", class, fn_name, message)
    }

    /// Format string argument for log output
    ///
    /// # Examples
    /// ```
    /// use treegrid_engine::common::log_format::LogFormat;
    ///
    /// assert_eq!(LogFormat::format_str_arg("row-1"), "'row-1'");
    /// ```
    pub fn format_str_arg(s: &str) -> String {
        if s.chars().count() > 50 {
            let head: String = s.chars().take(47).collect();
            format!("'{}'...", head)
        } else {
            format!("'{}'", s)
        }
    }
}

/// Log macro: fn call
///
/// # Examples
/// ```ignore
/// use crate::fn_log;
///
/// fn_log!("EditorSession", "toggle_expand", "row-1");
/// // Logs: EditorSession::toggle_expand('row-1')
/// ```
#[macro_export]
macro_rules! fn_log {
    ($class:expr, $fun:expr $(, $arg:expr)*) => {{
        #[cfg(feature = "logging")]
        {
            let args: Vec<String> = vec![
                $(
                    $crate::common::log_format::LogFormat::format_str_arg($arg),
                )*
            ];
            log::debug!("{}", $crate::common::log_format::LogFormat::call($class, $fun, &args));
        }
    }};
}

/// Log macro: recoverable anomaly
///
/// # Examples
/// ```ignore
/// use crate::warn_log;
///
/// warn_log!("Load", "rows", "parent '9' not found for 'row-3'");
/// // Logs: Load::rows: parent '9' not found for 'row-3'
/// ```
#[macro_export]
macro_rules! warn_log {
    ($class:expr, $fun:expr, $msg:expr) => {{
        #[cfg(feature = "logging")]
        {
            log::warn!("{}", $crate::common::log_format::LogFormat::message($class, $fun, $msg));
        }
    }};
}
