//! 运行时类型描述（TypeInfo）
//!
//! 以显式元数据描述控件类型层级，用于在运行时判断“可赋值”关系：
//! 类型 `A.is_assignable_from(B)` 当且仅当 `B` 与 `A` 相同，或 `B` 的基类型链
//! 或其实现的接口（递归）中包含 `A`。
//!
//! 描述符通常声明为 `static`，通过 `'static` 引用在注册表与控件之间共享：
//!
//! ```
//! use rxbind_platform::TypeInfo;
//!
//! struct View;
//! struct Button;
//! trait Clickable {}
//!
//! static CLICKABLE: TypeInfo = TypeInfo::of::<dyn Clickable>("Clickable");
//! static VIEW: TypeInfo = TypeInfo::of::<View>("View");
//! static BUTTON: TypeInfo = TypeInfo::of::<Button>("Button")
//!     .extends(&VIEW)
//!     .implements(&[&CLICKABLE])
//!     .with_events(&["Click"]);
//!
//! assert!(VIEW.is_assignable_from(&BUTTON));
//! assert!(CLICKABLE.is_assignable_from(&BUTTON));
//! assert!(!BUTTON.is_assignable_from(&VIEW));
//! assert!(BUTTON.declares_event("Click"));
//! ```
//!
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Clone, Copy)]
pub struct TypeInfo {
    name: &'static str,
    id: fn() -> TypeId,
    base: Option<&'static TypeInfo>,
    interfaces: &'static [&'static TypeInfo],
    events: &'static [&'static str],
}

impl TypeInfo {
    /// 以 Rust 类型 `T` 作为身份创建描述符
    pub const fn of<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            name,
            id: TypeId::of::<T>,
            base: None,
            interfaces: &[],
            events: &[],
        }
    }

    pub const fn extends(self, base: &'static TypeInfo) -> Self {
        Self {
            base: Some(base),
            ..self
        }
    }

    pub const fn implements(self, interfaces: &'static [&'static TypeInfo]) -> Self {
        Self { interfaces, ..self }
    }

    /// 声明该类型自身暴露的原生事件名
    pub const fn with_events(self, events: &'static [&'static str]) -> Self {
        Self { events, ..self }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        (self.id)()
    }

    pub fn base(&self) -> Option<&'static TypeInfo> {
        self.base
    }

    pub fn interfaces(&self) -> &'static [&'static TypeInfo] {
        self.interfaces
    }

    /// `other` 是否与 `self` 相同，或为其子类型/实现者
    pub fn is_assignable_from(&self, other: &TypeInfo) -> bool {
        if self == other {
            return true;
        }
        other.interfaces.iter().any(|i| self.is_assignable_from(i))
            || other.base.is_some_and(|b| self.is_assignable_from(b))
    }

    /// 该类型或其祖先（基类型与接口）是否声明了事件 `event`
    pub fn declares_event(&self, event: &str) -> bool {
        self.events.contains(&event)
            || self.interfaces.iter().any(|i| i.declares_event(event))
            || self.base.is_some_and(|b| b.declares_event(event))
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("base", &self.base.map(|b| b.name))
            .finish()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
