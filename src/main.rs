use anyhow::Result;
use log::info;

use smurfing_hunter::cli::CliApp;

fn main() -> Result<()> {
    // 加载 .env 文件
    dotenv::dotenv().ok();

    // 初始化日志系统
    env_logger::init();

    info!("启动区块链反洗钱分析工具...");

    let matches = CliApp::build_cli().get_matches();
    let app = CliApp::new()?;
    app.run(matches)
}
