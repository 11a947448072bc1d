use kup_di::KupContainer;
use kup_di_abstractions::DiContainer;
use kup_macros::Injectable;
use std::sync::Arc;

#[derive(Injectable)]
pub struct Config;

#[derive(Injectable)]
pub struct Pool(Arc<Config>);

#[derive(Injectable)]
pub struct Service {
    pool: Arc<Pool>,
    #[inject(default)]
    retries: u32,
}

fn main() {
    let container = KupContainer::new();
    container.bind_type::<Config, Config>();
    container.bind_type::<Pool, Pool>();
    container.bind_type::<Service, Service>();

    let service = container.create().instance_of::<Service>().unwrap();
    let Pool(config) = service.pool.as_ref();
    let _: &Arc<Config> = config;
    assert_eq!(service.retries, 0);
}
