//! # 示例应用程序
//!
//! 演示如何使用 Kup 依赖注入容器：配置加载、日志初始化、显式绑定、
//! 命名空间自动绑定、监听器和按名称解析。

use clap::Parser;
use kup_common::init_logging;
use kup_di::KupContainer;
use kup_di_abstractions::{ContainerConfig, DiContainer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// 示例服务
pub mod services {
    use kup_macros::{component, Injectable};
    use parking_lot::Mutex;
    use std::sync::Arc;

    pub trait Repository: Send + Sync {
        fn save(&self, order: &str) -> usize;
    }

    pub trait Notifier: Send + Sync {
        fn notify(&self, message: &str);
    }

    #[component(dyn Repository)]
    #[derive(Injectable)]
    pub struct InMemoryRepository {
        #[inject(default)]
        orders: Mutex<Vec<String>>,
    }

    impl Repository for InMemoryRepository {
        fn save(&self, order: &str) -> usize {
            let mut orders = self.orders.lock();
            orders.push(order.to_string());
            orders.len()
        }
    }

    #[component(dyn Notifier)]
    #[derive(Injectable)]
    pub struct LogNotifier;

    impl Notifier for LogNotifier {
        fn notify(&self, message: &str) {
            tracing::info!("通知: {}", message);
        }
    }

    #[component]
    #[derive(Injectable)]
    pub struct OrderService {
        repository: Arc<dyn Repository>,
        notifier: Arc<dyn Notifier>,
    }

    impl OrderService {
        pub fn place(&self, order: &str) -> usize {
            let count = self.repository.save(order);
            self.notifier.notify(&format!("订单 {} 已保存，共 {} 个订单", order, count));
            count
        }
    }
}

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Kup 依赖注入示例应用")]
struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 自动绑定的命名空间（覆盖配置文件）
    #[arg(long)]
    scope: Option<String>,

    /// 日志级别（覆盖配置文件）
    #[arg(long)]
    log_level: Option<String>,

    /// 使用 JSON 格式输出日志
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ContainerConfig::load(args.config.as_deref())?;
    if let Some(scope) = args.scope {
        config = config.with_scope(scope);
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    config.logging.json_format |= args.json;
    if config.scope.is_none() {
        config = config.with_scope(format!("{}::services", module_path!()));
    }

    init_logging(&config.logging)?;
    info!("启动 Kup 示例应用");

    let container = Arc::new(KupContainer::from_config(&config));

    demonstrate_bindings(&container)?;
    demonstrate_concurrent_resolution(&container).await?;
    demonstrate_name_lookup(&container);

    info!("容器统计: {}", serde_json::to_string(&container.stats())?);
    info!("应用已退出");
    Ok(())
}

/// 演示显式绑定、自动绑定和监听器
fn demonstrate_bindings(container: &KupContainer) -> anyhow::Result<()> {
    use services::{InMemoryRepository, OrderService, Repository};

    container.singleton_type::<dyn Repository, InMemoryRepository>();
    container.listen_for::<OrderService, _>(|_| info!("OrderService 已创建"));

    let service = container.create().instance_of::<OrderService>()?;
    service.place("A-1001");
    service.place("A-1002");

    let another = container.create().instance_of::<OrderService>()?;
    let count = another.place("A-1003");
    info!("共享单例仓储中的订单数量: {}", count);

    Ok(())
}

/// 演示在多个线程中并发解析同一个单例
async fn demonstrate_concurrent_resolution(container: &Arc<KupContainer>) -> anyhow::Result<()> {
    use services::Repository;

    let mut handles = Vec::new();
    for index in 0..4 {
        let container = container.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            container
                .get()
                .singleton_of::<dyn Repository>()
                .map(|repository| repository.save(&format!("B-{}", index)))
        }));
    }

    for handle in handles {
        let count = handle.await??;
        info!("并发保存订单后数量: {}", count);
    }
    Ok(())
}

/// 演示按名称解析
fn demonstrate_name_lookup(container: &KupContainer) {
    match container.create().instance_of_name("Notifier") {
        Ok(instance) => info!(
            "按名称解析 Notifier 得到 {}",
            instance
                .concrete_type()
                .map_or("<unknown>", |concrete| concrete.simple_name())
        ),
        Err(e) => error!("按名称解析失败: {}", e),
    }

    if let Err(e) = container.create().instance_of_name("Missing") {
        info!("预期的解析错误: {}", e);
    }
}
