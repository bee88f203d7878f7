//! Canned user-facing replies and reply clean-up.

pub const TOO_FREQUENT: &str = "问得太频繁了，让我歇一歇~~";
pub const AUTH_FAILED: &str = "OpenAI API 认证失败，请检查 API 密钥是否正确";
pub const CONNECTION_FAILED: &str = "无法连接到 OpenAI API，请检查网络连接";
pub const API_ERROR_PREFIX: &str = "OpenAI API 返回了错误：";
pub const UNDER_MAINTENANCE: &str = "机器人临时检修，请稍后访问！";
pub const COMMAND_FORMAT_ERROR: &str = "指令格式错误，正确格式：#CMD#指令名#参数#";

pub fn delay_updated(secs: u64) -> String {
    format!("最小时延已设置为{secs}秒")
}

/// Drop one leading blank line pair and fold paragraph breaks into line breaks.
pub fn normalize_reply(content: &str) -> String {
    content
        .strip_prefix("\n\n")
        .unwrap_or(content)
        .replace("\n\n", "\n")
}
