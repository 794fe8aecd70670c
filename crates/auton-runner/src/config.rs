//! # 运行配置
//!
//! 自动阶段时长和控制循环节拍，从 TOML 文件加载。
//!
//! ```toml
//! [period]
//! duration_secs = 15.0
//!
//! [loop]
//! frequency_hz = 50.0
//! max_iterations = 1000
//! spin = false
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// 超过此频率时输出警告
const HIGH_FREQUENCY_WARN_HZ: f64 = 10_000.0;

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读写配置文件失败
    #[error("Config file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML 解析失败
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML 序列化失败
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// 配置值非法
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// 自动阶段运行配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// 阶段设置
    pub period: PeriodSettings,

    /// 循环设置
    #[serde(rename = "loop")]
    pub control_loop: LoopSettings,
}

/// 自动阶段设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodSettings {
    /// 阶段时长（秒）
    pub duration_secs: f64,
}

impl Default for PeriodSettings {
    fn default() -> Self {
        PeriodSettings {
            duration_secs: 15.0, // 比赛自动阶段 15 秒
        }
    }
}

/// 控制循环设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopSettings {
    /// 控制频率（Hz）
    ///
    /// 例如：50.0 表示 50Hz（20ms 周期）
    pub frequency_hz: f64,

    /// 最大迭代次数（None 表示直到阶段结束）
    pub max_iterations: Option<u32>,

    /// 使用 `spin_sleep` 降低延时抖动（占用更多 CPU）
    pub spin: bool,
}

impl Default for LoopSettings {
    fn default() -> Self {
        LoopSettings {
            frequency_hz: 50.0,
            max_iterations: None,
            spin: false,
        }
    }
}

impl RunnerConfig {
    /// 从 TOML 字符串解析并校验
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RunnerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "runner config loaded");
        Ok(config)
    }

    /// 序列化为 TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = self.to_toml_string()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 校验配置
    ///
    /// - `frequency_hz` 必须是有限正数，且周期能表示为 `Duration`
    /// - `duration_secs` 必须是有限正数
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hz = self.control_loop.frequency_hz;
        if !hz.is_finite() || hz <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "frequency_hz: {} (must be > 0)",
                hz
            )));
        }
        if Duration::try_from_secs_f64(1.0 / hz).is_err() {
            return Err(ConfigError::Invalid(format!(
                "frequency_hz: {} (period too long)",
                hz
            )));
        }
        if hz > HIGH_FREQUENCY_WARN_HZ {
            tracing::warn!(
                "Very high control frequency: {} Hz. This may cause performance issues.",
                hz
            );
        }

        let duration = self.period.duration_secs;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "duration_secs: {} (must be > 0)",
                duration
            )));
        }

        Ok(())
    }

    /// 标称循环周期
    ///
    /// 调用前应先 `validate()`；未校验的非法频率返回 `Duration::MAX`。
    pub fn nominal_period(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.control_loop.frequency_hz).unwrap_or(Duration::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert_eq!(config.period.duration_secs, 15.0);
        assert_eq!(config.control_loop.frequency_hz, 50.0);
        assert_eq!(config.control_loop.max_iterations, None);
        assert!(!config.control_loop.spin);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nominal_period() {
        let config = RunnerConfig::default();
        assert_eq!(config.nominal_period(), Duration::from_millis(20));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = RunnerConfig::from_toml_str(
            r#"
[loop]
frequency_hz = 100.0
"#,
        )
        .unwrap();
        assert_eq!(config.control_loop.frequency_hz, 100.0);
        assert_eq!(config.period.duration_secs, 15.0);
        assert!(!config.control_loop.spin);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = RunnerConfig::from_toml_str("").unwrap();
        assert_eq!(config, RunnerConfig::default());
    }

    #[test]
    fn test_invalid_frequency() {
        let err = RunnerConfig::from_toml_str("[loop]\nfrequency_hz = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = RunnerConfig::from_toml_str("[loop]\nfrequency_hz = -5.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        // 正数但周期超出 Duration 范围
        let err = RunnerConfig::from_toml_str("[loop]\nfrequency_hz = 1e-30\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("period too long"));
    }

    #[test]
    fn test_nominal_period_never_panics() {
        let mut config = RunnerConfig::default();
        config.control_loop.frequency_hz = 1e-30;
        assert_eq!(config.nominal_period(), Duration::MAX);
    }

    #[test]
    fn test_invalid_duration() {
        let err = RunnerConfig::from_toml_str("[period]\nduration_secs = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("duration_secs"));
    }

    #[test]
    fn test_parse_error() {
        let err = RunnerConfig::from_toml_str("[loop]\nfrequency_hz = \"fast\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = RunnerConfig {
            period: PeriodSettings { duration_secs: 20.0 },
            control_loop: LoopSettings {
                frequency_hz: 200.0,
                max_iterations: Some(500),
                spin: true,
            },
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[loop]"));
        assert_eq!(RunnerConfig::from_toml_str(&text).unwrap(), config);
    }
}
