//! 绑定器选择（CommandBinders）
//!
//! 持有多个绑定器，每次绑定时询问各绑定器对目标类型的亲和度，
//! 选出正亲和度最高者（相同亲和度时先加入者胜出）完成绑定。
//!
use crate::binder::{BindingHandle, CreatesCommandBinding};
use crate::error::{BindingError, BindingResult};
use crate::target::{BindTarget, ParameterStream};
use crate::type_info::TypeInfo;
use rxbind_core::Command;
use std::rc::Rc;
use tracing::debug;

#[derive(Default)]
pub struct CommandBinders {
    binders: Vec<Box<dyn CreatesCommandBinding>>,
}

impl CommandBinders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, binder: impl CreatesCommandBinding + 'static) -> Self {
        self.push(binder);
        self
    }

    pub fn push(&mut self, binder: impl CreatesCommandBinding + 'static) {
        self.binders.push(Box::new(binder));
    }

    pub fn len(&self) -> usize {
        self.binders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binders.is_empty()
    }

    fn select(
        &self,
        type_info: &TypeInfo,
        has_event_target: bool,
    ) -> Option<(i32, &dyn CreatesCommandBinding)> {
        self.binders
            .iter()
            .map(|b| (b.affinity_for_object(type_info, has_event_target), &**b))
            .filter(|(affinity, _)| *affinity > 0)
            .fold(None, |best, (affinity, binder)| match best {
                Some((top, _)) if top >= affinity => best,
                _ => Some((affinity, binder)),
            })
    }

    /// 目标类型可获得的最高亲和度，无可用绑定器时为 0
    pub fn affinity_for(&self, type_info: &TypeInfo, has_event_target: bool) -> i32 {
        self.select(type_info, has_event_target)
            .map_or(0, |(affinity, _)| affinity)
    }

    /// 绑定命令；`event_name` 为 `Some` 时绑定到指定事件
    pub fn bind(
        &self,
        command: Rc<dyn Command>,
        target: Rc<dyn BindTarget>,
        parameter: Option<ParameterStream>,
        event_name: Option<&str>,
    ) -> BindingResult<BindingHandle> {
        let type_info = target.type_info();
        let Some((affinity, binder)) = self.select(type_info, event_name.is_some()) else {
            return Err(BindingError::NoBinderFound {
                type_name: type_info.name().to_string(),
            });
        };

        debug!(target_type = type_info.name(), affinity, event = ?event_name, "command binder selected");
        match event_name {
            Some(event) => binder.bind_command_to_event(command, target, parameter, event),
            None => binder.bind_command_to_object(command, target, parameter),
        }
    }
}
