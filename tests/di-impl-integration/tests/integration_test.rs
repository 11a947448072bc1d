//! 容器行为的集成测试：显式绑定、单例、监听器、按名称解析和命名空间自动绑定

use kup_di::KupContainer;
use kup_di_abstractions::{
    ComponentResolver, DependencyError, DependencyResult, DiContainer, Implements, Injectable,
    TypeCatalog, TypeIdentity,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 测试组件
pub trait AbstractClass: Send + Sync {
    fn name(&self) -> &'static str;
}

pub struct ConcreteClass;

impl AbstractClass for ConcreteClass {
    fn name(&self) -> &'static str {
        "ConcreteClass"
    }
}

impl Injectable for ConcreteClass {
    fn inject(_resolver: &mut dyn ComponentResolver) -> DependencyResult<Self> {
        Ok(Self)
    }
}

impl Implements<dyn AbstractClass> for ConcreteClass {
    fn upcast(self: Arc<Self>) -> Arc<dyn AbstractClass> {
        self
    }
}

/// 自动绑定使用的命名空间
pub mod scope {
    use super::*;

    pub trait SingleAbstract: Send + Sync {
        fn name(&self) -> &'static str;
    }

    pub struct SingleConcrete;

    impl SingleAbstract for SingleConcrete {
        fn name(&self) -> &'static str {
            "SingleConcrete"
        }
    }

    /// 有两个实现的抽象类型
    pub trait AbstractClass: Send + Sync {}

    pub struct FirstImplementation;
    impl AbstractClass for FirstImplementation {}

    pub struct SecondImplementation;
    impl AbstractClass for SecondImplementation {}

    pub trait ParentAbstractClass: Send + Sync {
        fn first(&self) -> &Arc<dyn FirstAbstractClass>;
        fn name(&self) -> &'static str;
    }

    pub trait FirstAbstractClass: Send + Sync {
        fn third(&self) -> &Arc<dyn ThirdAbstractClass>;
        fn name(&self) -> &'static str;
    }

    pub trait ThirdAbstractClass: Send + Sync {
        fn name(&self) -> &'static str;
    }

    pub struct ParentConcreteClass {
        first: Arc<dyn FirstAbstractClass>,
    }

    impl ParentAbstractClass for ParentConcreteClass {
        fn first(&self) -> &Arc<dyn FirstAbstractClass> {
            &self.first
        }

        fn name(&self) -> &'static str {
            "ParentConcreteClass"
        }
    }

    pub struct FirstConcreteClass {
        third: Arc<dyn ThirdAbstractClass>,
    }

    impl FirstAbstractClass for FirstConcreteClass {
        fn third(&self) -> &Arc<dyn ThirdAbstractClass> {
            &self.third
        }

        fn name(&self) -> &'static str {
            "FirstConcreteClass"
        }
    }

    pub struct ThirdConcreteClass;

    impl ThirdAbstractClass for ThirdConcreteClass {
        fn name(&self) -> &'static str {
            "ThirdConcreteClass"
        }
    }

    impl Injectable for SingleConcrete {
        fn inject(_resolver: &mut dyn ComponentResolver) -> DependencyResult<Self> {
            Ok(Self)
        }
    }

    impl Injectable for FirstImplementation {
        fn inject(_resolver: &mut dyn ComponentResolver) -> DependencyResult<Self> {
            Ok(Self)
        }
    }

    impl Injectable for SecondImplementation {
        fn inject(_resolver: &mut dyn ComponentResolver) -> DependencyResult<Self> {
            Ok(Self)
        }
    }

    impl Injectable for ParentConcreteClass {
        fn inject(resolver: &mut dyn ComponentResolver) -> DependencyResult<Self> {
            Ok(Self {
                first: resolver.resolve::<dyn FirstAbstractClass>()?,
            })
        }
    }

    impl Injectable for FirstConcreteClass {
        fn inject(resolver: &mut dyn ComponentResolver) -> DependencyResult<Self> {
            Ok(Self {
                third: resolver.resolve::<dyn ThirdAbstractClass>()?,
            })
        }
    }

    impl Injectable for ThirdConcreteClass {
        fn inject(_resolver: &mut dyn ComponentResolver) -> DependencyResult<Self> {
            Ok(Self)
        }
    }

    impl Implements<dyn SingleAbstract> for SingleConcrete {
        fn upcast(self: Arc<Self>) -> Arc<dyn SingleAbstract> {
            self
        }
    }

    impl Implements<dyn AbstractClass> for FirstImplementation {
        fn upcast(self: Arc<Self>) -> Arc<dyn AbstractClass> {
            self
        }
    }

    impl Implements<dyn AbstractClass> for SecondImplementation {
        fn upcast(self: Arc<Self>) -> Arc<dyn AbstractClass> {
            self
        }
    }

    impl Implements<dyn ParentAbstractClass> for ParentConcreteClass {
        fn upcast(self: Arc<Self>) -> Arc<dyn ParentAbstractClass> {
            self
        }
    }

    impl Implements<dyn FirstAbstractClass> for FirstConcreteClass {
        fn upcast(self: Arc<Self>) -> Arc<dyn FirstAbstractClass> {
            self
        }
    }

    impl Implements<dyn ThirdAbstractClass> for ThirdConcreteClass {
        fn upcast(self: Arc<Self>) -> Arc<dyn ThirdAbstractClass> {
            self
        }
    }

    /// 命名空间内的组件注册表
    pub fn catalog() -> TypeCatalog {
        TypeCatalog::new()
            .with::<dyn SingleAbstract, SingleConcrete>()
            .with::<SingleConcrete, SingleConcrete>()
            .with::<dyn AbstractClass, FirstImplementation>()
            .with::<dyn AbstractClass, SecondImplementation>()
            .with::<dyn ParentAbstractClass, ParentConcreteClass>()
            .with::<dyn FirstAbstractClass, FirstConcreteClass>()
            .with::<dyn ThirdAbstractClass, ThirdConcreteClass>()
    }

    /// 命名空间路径
    pub fn namespace() -> String {
        module_path!().to_string()
    }
}

fn scoped_container() -> KupContainer {
    KupContainer::with_catalog(scope::namespace(), scope::catalog())
}

#[test]
fn test_bind_returns_new_instances() {
    let container = KupContainer::new();
    container.bind::<dyn AbstractClass, _>(|| Arc::new(ConcreteClass));

    let first = container.create().instance_of::<dyn AbstractClass>().unwrap();
    let second = container.create().instance_of::<dyn AbstractClass>().unwrap();

    assert_eq!(first.name(), "ConcreteClass");
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_bind_type_returns_new_instances() {
    let container = KupContainer::new();
    container.bind_type::<dyn AbstractClass, ConcreteClass>();

    let first = container.create().instance_of::<dyn AbstractClass>().unwrap();
    let second = container.create().instance_of::<dyn AbstractClass>().unwrap();

    assert_eq!(first.name(), "ConcreteClass");
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_singleton_returns_same_instance() {
    let container = KupContainer::new();
    container.singleton::<dyn AbstractClass, _>(|| Arc::new(ConcreteClass));

    let first = container.get().singleton_of::<dyn AbstractClass>().unwrap();
    let second = container.get().singleton_of::<dyn AbstractClass>().unwrap();
    let created = container.create().instance_of::<dyn AbstractClass>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first, &created));
}

#[test]
fn test_singleton_type_returns_same_instance() {
    let container = KupContainer::new();
    container.singleton_type::<dyn AbstractClass, ConcreteClass>();

    let first = container.get().singleton_of::<dyn AbstractClass>().unwrap();
    let second = container.get().singleton_of::<dyn AbstractClass>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(container.stats().active_singletons, 1);
}

#[test]
fn test_listen_for_bind() {
    let container = KupContainer::new();
    container.bind_type::<dyn AbstractClass, ConcreteClass>();

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    container.listen_for::<dyn AbstractClass, _>(move |instance| {
        assert_eq!(instance.name(), "ConcreteClass");
        counter.fetch_add(1, Ordering::SeqCst);
    });

    container.create().instance_of::<dyn AbstractClass>().unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    container.create().instance_of::<dyn AbstractClass>().unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn test_listen_for_singleton_fires_on_cache_hits() {
    let container = KupContainer::new();
    container.singleton_type::<dyn AbstractClass, ConcreteClass>();

    let seen: Arc<Mutex<Vec<Arc<dyn AbstractClass>>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    container.listen_for::<dyn AbstractClass, _>(move |instance| {
        recorder.lock().push(instance.clone());
    });

    let first = container.create().singleton_of::<dyn AbstractClass>().unwrap();
    let second = container.get().singleton_of::<dyn AbstractClass>().unwrap();

    let seen = seen.lock();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|instance| Arc::ptr_eq(instance, &first)));
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_duplicate_listeners_both_fire() {
    let container = KupContainer::new();
    container.bind_type::<dyn AbstractClass, ConcreteClass>();

    let fired = Arc::new(AtomicUsize::new(0));
    for _ in 0..2 {
        let counter = fired.clone();
        container.listen_for::<dyn AbstractClass, _>(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    }

    container.create().instance_of::<dyn AbstractClass>().unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn test_instance_of_full_name() -> anyhow::Result<()> {
    let container = KupContainer::new();
    container.bind_type::<dyn AbstractClass, ConcreteClass>();
    let name = TypeIdentity::of::<dyn AbstractClass>().qualified_name().to_string();

    let instance = container.create().instance_of_name(&name)?;
    let concrete = instance.downcast::<dyn AbstractClass>()?;

    assert_eq!(concrete.name(), "ConcreteClass");
    assert_eq!(
        instance.concrete_type().map(TypeIdentity::simple_name),
        Some("ConcreteClass")
    );
    Ok(())
}

#[test]
fn test_instance_of_simple_name() -> anyhow::Result<()> {
    let container = KupContainer::new();
    container.bind_type::<dyn AbstractClass, ConcreteClass>();

    let concrete = container
        .create()
        .instance_of_name_as::<dyn AbstractClass>("AbstractClass")?;

    assert_eq!(concrete.name(), "ConcreteClass");
    Ok(())
}

#[test]
fn test_instance_of_unknown_name() {
    let container = KupContainer::new();

    let error = container.create().instance_of_name("Unknown").unwrap_err();

    assert_eq!(error, DependencyError::type_not_found("Unknown"));
}

#[test]
fn test_simple_name_shared_by_two_types_is_ambiguous() {
    let container = scoped_container();
    container.bind_type::<dyn AbstractClass, ConcreteClass>();

    let error = container.create().instance_of_name("AbstractClass").unwrap_err();
    assert!(matches!(error, DependencyError::AmbiguousTypeName { .. }));

    let name = TypeIdentity::of::<dyn AbstractClass>().qualified_name().to_string();
    assert!(container.create().instance_of_name(&name).is_ok());
}

#[test]
fn test_auto_bind_single_implementation() {
    let container = scoped_container();

    let concrete = container
        .create()
        .instance_of::<dyn scope::SingleAbstract>()
        .unwrap();

    assert_eq!(concrete.name(), "SingleConcrete");
    assert!(container.is_bound::<dyn scope::SingleAbstract>());
    assert_eq!(container.stats().scanned_scopes, 1);
}

#[test]
fn test_auto_bind_concrete_type_directly() {
    let container = scoped_container();

    let concrete = container.create().instance_of::<scope::SingleConcrete>().unwrap();

    assert_eq!(scope::SingleAbstract::name(concrete.as_ref()), "SingleConcrete");
}

#[test]
fn test_auto_bind_by_name_triggers_scan() -> anyhow::Result<()> {
    let container = scoped_container();

    let concrete = container
        .create()
        .instance_of_name_as::<dyn scope::SingleAbstract>("SingleAbstract")?;

    assert_eq!(concrete.name(), "SingleConcrete");
    Ok(())
}

#[test]
fn test_multiple_implementations_error() {
    let container = scoped_container();

    let error = container
        .create()
        .instance_of::<dyn scope::AbstractClass>()
        .err()
        .unwrap();

    assert!(matches!(
        error,
        DependencyError::MultipleAbstractImplementations { ref candidates, .. } if candidates.len() == 2
    ));
    assert_eq!(error.to_string(), "Type[AbstractClass] has multiple instances");
}

#[test]
fn test_auto_bind_outside_scope() {
    let container = scoped_container();

    let error = container
        .create()
        .instance_of::<dyn AbstractClass>()
        .err()
        .unwrap();

    assert!(matches!(error, DependencyError::NoImplementationFound { .. }));
}

#[test]
fn test_nested_dependencies_resolved_automatically() {
    let parent = scoped_container()
        .create()
        .instance_of::<dyn scope::ParentAbstractClass>()
        .unwrap();

    assert_eq!(parent.name(), "ParentConcreteClass");
    assert_eq!(parent.first().name(), "FirstConcreteClass");
    assert_eq!(parent.first().third().name(), "ThirdConcreteClass");
}

#[test]
fn test_bind_type_resolves_nested_dependencies() {
    let container = scoped_container();
    container.bind_type::<dyn scope::ParentAbstractClass, scope::ParentConcreteClass>();

    let parent = container
        .create()
        .instance_of::<dyn scope::ParentAbstractClass>()
        .unwrap();

    assert_eq!(parent.first().third().name(), "ThirdConcreteClass");
}

#[test]
fn test_explicit_binding_wins_over_auto_binding() {
    let container = scoped_container();
    container.bind_type::<dyn scope::AbstractClass, scope::SecondImplementation>();

    assert!(container
        .create()
        .instance_of::<dyn scope::AbstractClass>()
        .is_ok());
}

#[test]
fn test_rebind_overwrites() {
    struct OtherClass;

    impl AbstractClass for OtherClass {
        fn name(&self) -> &'static str {
            "OtherClass"
        }
    }

    let container = KupContainer::new();
    container.bind_type::<dyn AbstractClass, ConcreteClass>();
    container.bind::<dyn AbstractClass, _>(|| Arc::new(OtherClass));

    let concrete = container.create().instance_of::<dyn AbstractClass>().unwrap();

    assert_eq!(concrete.name(), "OtherClass");
    assert_eq!(container.registered_types().len(), 1);
}
