// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库，支持中文（默认）和英文
// 红线: 每次翻译显式传入语言，不读写进程级当前语言
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["zh-CN", "en"];

/// 将调用方给出的语言代码归一到支持的语言
///
/// # 规则
/// - 忽略大小写与首尾空白，"en-US" / "en_GB" 归为 "en"
/// - 无法识别时回退到默认语言
pub fn resolve_locale(requested: &str) -> &'static str {
    let normalized = requested.trim().to_lowercase().replace('_', "-");
    if normalized == "en" || normalized.starts_with("en-") {
        "en"
    } else {
        DEFAULT_LOCALE
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use molty_lining::i18n::t;
/// let msg = t("en", "safety.front_not_found");
/// ```
pub fn t(locale: &str, key: &str) -> String {
    let locale = resolve_locale(locale);
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 翻译消息并替换 `%{name}` 占位符
///
/// # 参数
/// - `locale`: 语言代码
/// - `key`: 消息键
/// - `args`: (占位符名, 取值)
///
/// # 示例
/// ```no_run
/// use molty_lining::i18n::t_with_args;
/// let msg = t_with_args("zh-CN", "safety.shell_over_temperature", [("shell", "320.0"), ("limit", "300.0")]);
/// ```
pub fn t_with_args<I, K, V>(locale: &str, key: &str, args: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    args.into_iter().fold(t(locale, key), |message, (name, value)| {
        message.replace(&format!("%{{{}}}", name.as_ref()), value.as_ref())
    })
}
