//! 事件绑定器配置
//!
use bon::Builder;

/// [`EventCommandBinder`](crate::EventCommandBinder) 配置
#[derive(Clone, Debug, Builder)]
pub struct EventBinderConfig {
    /// 未指定事件名时按顺序探测的默认触发事件
    #[builder(default = vec!["Click", "TouchUpInside", "MouseUp"])]
    pub default_events: Vec<&'static str>,
    /// 调用方指定事件名时的亲和度
    #[builder(default = 5)]
    pub explicit_event_affinity: i32,
    /// 目标类型声明了默认事件时的亲和度
    #[builder(default = 3)]
    pub default_event_affinity: i32,
    /// 是否把命令的可执行状态写入目标的可用状态属性
    #[builder(default = true)]
    pub track_enabled: bool,
    #[builder(default = "Enabled")]
    pub enabled_property: &'static str,
}

impl Default for EventBinderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl EventBinderConfig {
    pub(crate) fn enabled_property(&self) -> Option<&'static str> {
        self.track_enabled.then_some(self.enabled_property)
    }
}
