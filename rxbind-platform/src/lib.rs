//! 命令绑定平台层（rxbind-platform）
//!
//! 把抽象命令（执行动作 + 可执行谓词）连接到具体控件的原生事件与“可用状态”属性：
//! - 类型描述（`type_info`）：显式的运行时类型层级元数据与可赋值判断；
//! - 绑定目标（`target`）：控件向绑定层暴露的事件原语与属性写入器；
//! - 注册表（`registration`）与灵活绑定器（`flexible`）：按类型亲和度选取描述符并组合订阅；
//! - 事件名绑定器（`event_binder`）与绑定器选择（`binders`）：在多个绑定器间择优。
//!
//! 典型用法：
//! 1. 为平台控件声明 `static` 的 [`TypeInfo`] 并实现 [`BindTarget`]；
//! 2. 构造 [`FlexibleCommandBinder`]，为各控件类型注册描述符（通常借助 `for_event`）；
//! 3. 把它与 [`EventCommandBinder`] 一起放入 [`CommandBinders`]；
//! 4. 调用 `bind` 得到一个释放句柄，释放后绑定的全部订阅一并解除。
//!
//! 全部操作在 UI 线程上同步执行，不提供跨线程同步。
//!
pub mod binder;
pub mod binders;
pub mod config;
pub mod error;
pub mod event_binder;
pub mod flexible;
pub mod registration;
pub mod target;
pub mod type_info;

pub use binder::{BindingHandle, CreatesCommandBinding};
pub use binders::CommandBinders;
pub use config::EventBinderConfig;
pub use error::{BindingError, BindingResult};
pub use event_binder::EventCommandBinder;
pub use flexible::FlexibleCommandBinder;
pub use registration::{BindingDescriptor, BuildBindingFn, RegistrationTable};
pub use target::{BindTarget, EventStream, ParameterStream, Settable};
pub use type_info::TypeInfo;
