//! 绑定层统一错误定义
//!
//! 所有失败都在绑定时同步返回；绑定成功之后不会再产生错误。
//! 缺少“可用状态”属性的写入器不属于错误，绑定会退化为仅事件绑定。
//!
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BindingError {
    /// 没有任何已注册描述符兼容目标类型
    #[error("command binding for {type_name} is not supported")]
    NotSupported { type_name: String },

    /// 有意不提供的绑定路径
    #[error("not implemented: {operation}")]
    NotImplemented { operation: &'static str },

    /// 平台事件原语无法在目标上解析指定事件
    #[error("event not found: type={type_name}, event={event}")]
    EventNotFound { type_name: String, event: String },

    /// 没有任何绑定器对目标类型给出正的亲和度
    #[error("no command binder found for {type_name}")]
    NoBinderFound { type_name: String },
}

impl BindingError {
    pub fn not_supported(type_name: impl Into<String>) -> Self {
        Self::NotSupported {
            type_name: type_name.into(),
        }
    }

    pub fn event_not_found(type_name: impl Into<String>, event: impl Into<String>) -> Self {
        Self::EventNotFound {
            type_name: type_name.into(),
            event: event.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type BindingResult<T> = Result<T, BindingError>;
