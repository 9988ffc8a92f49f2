//! 命令绑定器协议（CreatesCommandBinding）
//!
//! 绑定器先通过亲和度声明自己对某一目标类型的适配程度，
//! 再由调用方（通常是 [`CommandBinders`](crate::CommandBinders)）选出最高者执行绑定。
//!
use crate::error::BindingResult;
use crate::target::{BindTarget, ParameterStream};
use crate::type_info::TypeInfo;
use rxbind_core::{Command, Disposable};
use std::rc::Rc;

/// 一次绑定的整体释放句柄
pub type BindingHandle = Box<dyn Disposable>;

pub trait CreatesCommandBinding {
    /// 对 `type_info` 的亲和度，0 表示不支持
    ///
    /// `has_event_target` 为 `true` 表示调用方指定了事件名。
    fn affinity_for_object(&self, type_info: &TypeInfo, has_event_target: bool) -> i32;

    /// 绑定到目标的默认触发事件
    ///
    /// `parameter` 为 `None` 时以目标自身作为命令参数。
    fn bind_command_to_object(
        &self,
        command: Rc<dyn Command>,
        target: Rc<dyn BindTarget>,
        parameter: Option<ParameterStream>,
    ) -> BindingResult<BindingHandle>;

    /// 绑定到目标的指定事件
    fn bind_command_to_event(
        &self,
        command: Rc<dyn Command>,
        target: Rc<dyn BindTarget>,
        parameter: Option<ParameterStream>,
        event_name: &str,
    ) -> BindingResult<BindingHandle>;
}
