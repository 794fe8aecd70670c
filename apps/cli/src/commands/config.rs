//! 配置管理命令
//!
//! 查看和生成运行配置文件（TOML）

use anyhow::{Context, Result, bail};
use auton_runner::RunnerConfig;
use clap::Subcommand;
use std::path::{Path, PathBuf};

/// 加载配置：指定了路径就读文件，否则使用默认值
pub fn load_config(path: Option<&Path>) -> Result<RunnerConfig> {
    match path {
        Some(path) => RunnerConfig::load_from_file(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display())),
        None => Ok(RunnerConfig::default()),
    }
}

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 打印生效的配置
    Show {
        /// 配置文件路径（缺省为内置默认值）
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// 生成默认配置文件
    Init {
        /// 输出路径
        path: PathBuf,

        /// 覆盖已存在的文件
        #[arg(long)]
        force: bool,
    },
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Show { config } => Self::show_(config.as_deref()),

            ConfigCommand::Init { path, force } => Self::init_(&path, force),
        }
    }

    fn show_(path: Option<&Path>) -> Result<()> {
        let config = load_config(path)?;
        print!("{}", config.to_toml_string()?);
        Ok(())
    }

    fn init_(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            bail!("配置文件已存在: {}（使用 --force 覆盖）", path.display());
        }

        RunnerConfig::default()
            .save_to_file(path)
            .with_context(|| format!("写入配置文件失败: {}", path.display()))?;

        println!("✅ 已写入默认配置: {}", path.display());
        Ok(())
    }
}
