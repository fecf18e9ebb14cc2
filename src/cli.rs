use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use log::info;

use crate::config::Config;
use crate::core::pipeline::AnalysisPipeline;
use crate::loader::LedgerLoader;
use crate::table_display::TableDisplay;
use crate::utils;

// 命令行参数常量
const FILE_ARG: &str = "file";
const THRESHOLD_ARG: &str = "threshold";
const MAX_HOPS_ARG: &str = "max-hops";
const MAX_PATHS_ARG: &str = "max-paths";
const SAMPLE_ARG: &str = "sample";
const EXPORT_ARG: &str = "export";

/// CLI应用程序结构
pub struct CliApp {
    config: Config,
}

impl CliApp {
    /// 创建新的CLI应用程序实例
    pub fn new() -> Result<Self> {
        // 加载配置
        let config = Config::load()?;
        info!("配置加载完成");

        Ok(Self { config })
    }

    /// 构建命令行参数解析器
    pub fn build_cli() -> Command {
        Command::new("smurfing-hunter")
            .version("1.0")
            .about("区块链反洗钱图分析工具 - 检测扇出/扇入拆分转账模式")
            .arg(
                Arg::new(FILE_ARG)
                    .help("账本文件路径 (CSV 或 JSON)")
                    .value_name("FILE")
                    .required(true),
            )
            .arg(
                Arg::new(THRESHOLD_ARG)
                    .long(THRESHOLD_ARG)
                    .short('t')
                    .help("扇出/扇入判定阈值，计数严格大于才标记 (默认: 3)")
                    .value_name("NUMBER"),
            )
            .arg(
                Arg::new(MAX_HOPS_ARG)
                    .long(MAX_HOPS_ARG)
                    .short('k')
                    .help("路径枚举的跳数上限 (默认: 4)")
                    .value_name("NUMBER"),
            )
            .arg(
                Arg::new(MAX_PATHS_ARG)
                    .long(MAX_PATHS_ARG)
                    .help("每个组合最多保留的路径数 (默认: 不限制)")
                    .value_name("NUMBER"),
            )
            .arg(
                Arg::new(SAMPLE_ARG)
                    .long(SAMPLE_ARG)
                    .short('s')
                    .help("样本表展示的记录条数 (默认: 5)")
                    .value_name("NUMBER"),
            )
            .arg(
                Arg::new(EXPORT_ARG)
                    .long(EXPORT_ARG)
                    .short('e')
                    .help("将完整报告导出为 JSON 文件")
                    .value_name("PATH"),
            )
    }

    /// 运行CLI应用程序：加载账本 -> 执行分析 -> 渲染结果
    pub fn run(&self, matches: ArgMatches) -> Result<()> {
        let config = self.apply_overrides(&matches);

        let path = matches.get_one::<String>(FILE_ARG).unwrap();
        info!("加载账本文件: {}", path);
        let records = LedgerLoader::load(path)?;
        info!(
            "账本加载完成，共 {} 条记录，总金额 {}",
            records.len(),
            utils::format_big_number(&utils::total_volume(&records), 2)
        );

        let pipeline = AnalysisPipeline::new(config.analysis.clone());
        let report = pipeline.run(&records)?;

        println!("📊 样本转账记录");
        println!("{}", TableDisplay::render_sample(&records, config.display.sample_rows));
        println!();
        println!("📈 钱包度数统计");
        println!("{}", TableDisplay::render_degree_table(&report));
        println!();
        println!("🚨 可疑钱包");
        println!("{}", TableDisplay::render_suspicious_table(&report));
        println!();
        println!("🔗 洗钱路径");
        println!("{}", TableDisplay::render_paths(&report));

        if config.display.show_graph_stats {
            println!();
            println!("🕸 {}", TableDisplay::render_graph_stats(&report));
        }

        if let Some(export_path) = matches.get_one::<String>(EXPORT_ARG) {
            report.save_to_file(export_path)?;
            info!("报告已导出到 {}", export_path);
        }

        Ok(())
    }

    /// 用命令行参数覆盖默认配置
    fn apply_overrides(&self, matches: &ArgMatches) -> Config {
        let mut config = self.config.clone();

        if let Some(threshold) = matches.get_one::<String>(THRESHOLD_ARG) {
            config.analysis.fan_threshold =
                threshold.parse().unwrap_or(config.analysis.fan_threshold);
        }
        if let Some(max_hops) = matches.get_one::<String>(MAX_HOPS_ARG) {
            config.analysis.max_path_hops =
                max_hops.parse().unwrap_or(config.analysis.max_path_hops);
        }
        if let Some(max_paths) = matches.get_one::<String>(MAX_PATHS_ARG) {
            config.analysis.max_paths_per_pair = max_paths.parse().ok();
        }
        if let Some(sample) = matches.get_one::<String>(SAMPLE_ARG) {
            config.display.sample_rows =
                sample.parse().unwrap_or(config.display.sample_rows);
        }

        config
    }
}
