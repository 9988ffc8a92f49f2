//! 事件名绑定器（EventCommandBinder）
//!
//! 不依赖按类型注册的通用绑定器：
//! - 调用方给出事件名时，以固定的较高亲和度直接绑定该事件；
//! - 否则在目标类型声明的事件中按顺序探测配置的默认事件（如 `Click`）。
//!
//! 作为 [`FlexibleCommandBinder`] 的兜底，亲和度默认低于具体平台的注册项。
//!
use crate::binder::{BindingHandle, CreatesCommandBinding};
use crate::config::EventBinderConfig;
use crate::error::{BindingError, BindingResult};
use crate::flexible::FlexibleCommandBinder;
use crate::target::{BindTarget, ParameterStream};
use crate::type_info::TypeInfo;
use rxbind_core::Command;
use std::rc::Rc;
use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct EventCommandBinder {
    config: EventBinderConfig,
}

impl EventCommandBinder {
    pub fn new(config: EventBinderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EventBinderConfig {
        &self.config
    }

    /// `type_info` 声明的第一个默认事件
    pub fn default_event_for(&self, type_info: &TypeInfo) -> Option<&'static str> {
        self.config
            .default_events
            .iter()
            .copied()
            .find(|e| type_info.declares_event(e))
    }
}

impl CreatesCommandBinding for EventCommandBinder {
    fn affinity_for_object(&self, type_info: &TypeInfo, has_event_target: bool) -> i32 {
        if has_event_target {
            return self.config.explicit_event_affinity;
        }
        if self.default_event_for(type_info).is_some() {
            self.config.default_event_affinity
        } else {
            0
        }
    }

    fn bind_command_to_object(
        &self,
        command: Rc<dyn Command>,
        target: Rc<dyn BindTarget>,
        parameter: Option<ParameterStream>,
    ) -> BindingResult<BindingHandle> {
        let type_info = target.type_info();
        let Some(event) = self.default_event_for(type_info) else {
            return Err(BindingError::event_not_found(
                type_info.name(),
                self.config.default_events.join("|"),
            ));
        };

        debug!(target_type = type_info.name(), event, "binding command to default event");
        FlexibleCommandBinder::for_event(
            command,
            target,
            parameter,
            event,
            self.config.enabled_property(),
        )
    }

    fn bind_command_to_event(
        &self,
        command: Rc<dyn Command>,
        target: Rc<dyn BindTarget>,
        parameter: Option<ParameterStream>,
        event_name: &str,
    ) -> BindingResult<BindingHandle> {
        debug!(
            target_type = target.type_info().name(),
            event = event_name,
            "binding command to explicit event"
        );
        FlexibleCommandBinder::for_event(
            command,
            target,
            parameter,
            event_name,
            self.config.enabled_property(),
        )
    }
}
