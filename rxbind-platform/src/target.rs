//! 绑定目标（BindTarget）
//!
//! 平台控件需要向绑定层提供三项能力：
//! - 运行时类型描述（用于亲和度解析）；
//! - 事件订阅原语：把具名原生事件转换为可观察序列；
//! - 属性写入器解析：给定属性名，返回可写访问器或 `None`。
//!
use crate::type_info::TypeInfo;
use rxbind_core::{Observable, Parameter};
use std::any::Any;
use std::rc::Rc;

/// 原生事件的触发序列
pub type EventStream = Rc<dyn Observable<()>>;

/// 命令参数序列
pub type ParameterStream = Rc<dyn Observable<Parameter>>;

/// 可写访问器
pub trait Settable<T> {
    fn set(&self, value: T);
}

impl<T, F: Fn(T)> Settable<T> for F {
    fn set(&self, value: T) {
        self(value)
    }
}

pub trait BindTarget: Any {
    fn type_info(&self) -> &'static TypeInfo;

    /// 具名事件的触发序列；目标不存在该事件时返回 `None`
    fn event(&self, name: &str) -> Option<EventStream> {
        let _ = name;
        None
    }

    /// 布尔属性的写入器；无法解析时返回 `None`
    fn bool_property(&self, name: &str) -> Option<Rc<dyn Settable<bool>>> {
        let _ = name;
        None
    }
}

/// 目标自身作为命令参数
pub fn target_parameter(target: &Rc<dyn BindTarget>) -> Parameter {
    let target: Rc<dyn Any> = target.clone();
    Some(target)
}
