//! 运行器错误类型

use crate::config::ConfigError;
use thiserror::Error;

/// 自动阶段运行错误
#[derive(Debug, Error)]
pub enum RunnerError {
    /// 配置非法，循环未启动
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 例程内部错误，循环已中止
    #[error("Routine failed after {loops_run} loops: {source}")]
    Routine {
        /// 出错前完成的循环次数
        loops_run: u32,
        /// 例程返回的错误
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RunnerError {
    /// 是否为配置错误
    pub fn is_config_error(&self) -> bool {
        matches!(self, RunnerError::Config(_))
    }

    pub(crate) fn routine<E>(loops_run: u32, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RunnerError::Routine {
            loops_run,
            source: Box::new(err),
        }
    }
}
