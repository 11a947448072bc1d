//! 组件宏集成测试

use kup_di::KupContainer;
use kup_di_abstractions::{DependencyError, DiContainer, TypeCatalog, TypeIdentity};
use kup_macros::{component, Injectable};
use std::sync::Arc;

pub mod shapes {
    use super::*;

    pub trait Shape: Send + Sync {
        fn area(&self) -> f64;
    }

    #[component(dyn Shape)]
    #[derive(Injectable)]
    pub struct Circle;

    impl Shape for Circle {
        fn area(&self) -> f64 {
            std::f64::consts::PI
        }
    }
}

pub mod garage {
    use super::*;

    pub trait Fuel: Send + Sync {
        fn kind(&self) -> &'static str;
    }

    #[component(dyn Fuel)]
    #[derive(Injectable)]
    pub struct Diesel;

    impl Fuel for Diesel {
        fn kind(&self) -> &'static str {
            "diesel"
        }
    }

    #[component]
    #[derive(Injectable)]
    pub struct Engine {
        pub fuel: Arc<dyn Fuel>,
        #[inject(default)]
        pub cylinders: u32,
    }

    #[derive(Injectable)]
    pub struct Dashboard(pub Arc<Engine>);
}

pub mod reports {
    use super::*;

    #[derive(Injectable)]
    pub struct Report {
        pub engine: Arc<garage::Engine>,
        pub title: String,
    }
}

fn namespace(module: &str) -> String {
    format!("{}::{}", module_path!(), module)
}

#[test]
fn test_shape_resolves_to_circle() {
    use shapes::Shape;

    let container = KupContainer::with_scope(namespace("shapes"));

    let shape = container.create().instance_of::<dyn Shape>().unwrap();

    assert_eq!(shape.area(), std::f64::consts::PI);
    let instance = container.create().instance_of_name("Shape").unwrap();
    assert_eq!(
        instance.concrete_type().map(TypeIdentity::simple_name),
        Some("Circle")
    );
}

#[test]
fn test_engine_fuel_diesel() {
    let container = KupContainer::with_scope(namespace("garage"));

    let engine = container.create().instance_of::<garage::Engine>().unwrap();

    assert_eq!(engine.fuel.kind(), "diesel");
    assert_eq!(engine.cylinders, 0);
}

#[test]
fn test_tuple_struct_dependencies() {
    let container = KupContainer::with_scope(namespace("garage"));
    container.bind_type::<garage::Dashboard, garage::Dashboard>();

    let dashboard = container.create().instance_of::<garage::Dashboard>().unwrap();

    assert_eq!(dashboard.0.fuel.kind(), "diesel");
}

#[test]
fn test_component_registers_in_global_catalog() {
    let catalog = TypeCatalog::global();
    let circle = TypeIdentity::of::<shapes::Circle>();

    let abstractions: Vec<&str> = catalog
        .implementations()
        .iter()
        .filter(|implementation| implementation.concrete_type() == &circle)
        .map(|implementation| implementation.abstract_type().simple_name())
        .collect();

    assert!(abstractions.contains(&"Circle"));
    assert!(abstractions.contains(&"Shape"));
}

#[test]
fn test_unresolvable_field() {
    let container = KupContainer::with_scope(namespace("garage"));
    container.bind_type::<reports::Report, reports::Report>();

    let error = container
        .create()
        .instance_of::<reports::Report>()
        .err()
        .unwrap();

    assert!(matches!(
        error,
        DependencyError::UnresolvableParameter { ref parameter, ref parameter_type, .. }
            if parameter == "title" && parameter_type == "String"
    ));
}

#[test]
fn test_scope_does_not_leak_between_namespaces() {
    let container = KupContainer::with_scope(namespace("shapes"));

    let error = container
        .create()
        .instance_of::<dyn garage::Fuel>()
        .err()
        .unwrap();

    assert!(matches!(error, DependencyError::NoImplementationFound { .. }));
}
