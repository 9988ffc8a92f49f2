//! 灵活命令绑定器（FlexibleCommandBinder）
//!
//! 按目标运行时类型在注册表中选取最匹配的绑定描述符，并由描述符构建绑定：
//! - 亲和度解析：在全部“所属类型可赋值自目标类型”的描述符中取亲和度最高者；
//! - 绑定组合：`for_event` 把命令的执行接到目标的触发事件上，
//!   把目标的“可用状态”属性接到命令的可执行通知上，并跟踪最新的命令参数。
//!
//! 具体平台的绑定器持有一个 `FlexibleCommandBinder`，在构造时为各控件类型注册描述符：
//!
//! ```
//! use rxbind_platform::{FlexibleCommandBinder, TypeInfo};
//!
//! struct Button;
//! static BUTTON: TypeInfo = TypeInfo::of::<Button>("Button");
//!
//! let mut binder = FlexibleCommandBinder::new();
//! binder.register(&BUTTON, 9, |command, target, parameter| {
//!     FlexibleCommandBinder::for_event(command, target, parameter, "Click", Some("Enabled"))
//! });
//!
//! assert_eq!(binder.affinity_for_type(&BUTTON, false), 9);
//! assert_eq!(binder.affinity_for_type(&BUTTON, true), 0);
//! ```
//!
use crate::binder::{BindingHandle, CreatesCommandBinding};
use crate::error::{BindingError, BindingResult};
use crate::registration::{BindingDescriptor, RegistrationTable};
use crate::target::{BindTarget, ParameterStream, Settable, target_parameter};
use crate::type_info::TypeInfo;
use rxbind_core::{
    Command, CompositeDisposable, Disposable, Just, ObservableExt, Parameter,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};

#[derive(Clone, Debug, Default)]
pub struct FlexibleCommandBinder {
    table: RegistrationTable,
}

impl FlexibleCommandBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为 `owner` 注册绑定构建函数，已存在时替换
    ///
    /// 应在绑定器构造阶段完成全部注册，不要在绑定进行中调用。
    pub fn register<F>(&mut self, owner: &'static TypeInfo, affinity: i32, build: F)
    where
        F: Fn(
                Rc<dyn Command>,
                Rc<dyn BindTarget>,
                Option<ParameterStream>,
            ) -> BindingResult<BindingHandle>
            + 'static,
    {
        let replaced = self
            .table
            .insert(BindingDescriptor::new(owner, affinity, Rc::new(build)))
            .is_some();
        debug!(owner = owner.name(), affinity, replaced, "command binding registered");
    }

    pub fn registrations(&self) -> &RegistrationTable {
        &self.table
    }

    /// 兼容 `type_info` 且亲和度最高的描述符
    pub fn find_best_match(&self, type_info: &TypeInfo) -> Option<&BindingDescriptor> {
        self.table.best_match(type_info)
    }

    /// 指定了事件名时恒为 0，交由能处理事件名的绑定器
    pub fn affinity_for_type(&self, type_info: &TypeInfo, has_event_target: bool) -> i32 {
        if has_event_target {
            return 0;
        }
        self.find_best_match(type_info)
            .map_or(0, BindingDescriptor::affinity)
    }

    /// 以最匹配的描述符绑定命令；原样返回描述符构建出的句柄
    pub fn bind(
        &self,
        command: Rc<dyn Command>,
        target: Rc<dyn BindTarget>,
        parameter: Option<ParameterStream>,
    ) -> BindingResult<BindingHandle> {
        let type_info = target.type_info();
        let Some(descriptor) = self.find_best_match(type_info) else {
            return Err(BindingError::not_supported(type_info.name()));
        };

        debug!(
            target_type = type_info.name(),
            owner = descriptor.owner_type().name(),
            affinity = descriptor.affinity(),
            "binding command"
        );
        descriptor.build(command, target, parameter)
    }

    /// 把命令接到目标的 `event_name` 事件与 `enabled_property` 属性上
    ///
    /// 1. 事件每次触发时以最新参数调用 `can_execute`，为真则 `execute`；
    /// 2. 未给出属性名或属性无法解析写入器时，仅返回事件订阅；
    /// 3. 否则立即以 `can_execute(None)` 写入一次初始状态，再订阅参数序列
    ///    与命令的可执行通知，三者组合为一个整体释放单元。
    ///
    /// `parameter` 为 `None` 时以目标自身作为唯一参数。
    /// 最新参数槽未加同步，事件、通知与参数都应在同一逻辑线程上产生。
    pub fn for_event(
        command: Rc<dyn Command>,
        target: Rc<dyn BindTarget>,
        parameter: Option<ParameterStream>,
        event_name: &str,
        enabled_property: Option<&str>,
    ) -> BindingResult<BindingHandle> {
        let type_name = target.type_info().name();
        let events = target
            .event(event_name)
            .ok_or_else(|| BindingError::event_not_found(type_name, event_name))?;

        let latest: Rc<RefCell<Parameter>> = Rc::new(RefCell::new(None));

        let action = {
            let command = command.clone();
            let latest = latest.clone();
            let event = event_name.to_string();
            events.observe(move |_| {
                let param = latest.borrow().clone();
                trace!(target_type = type_name, event = %event, "trigger fired");
                if command.can_execute(&param) {
                    command.execute(&param);
                }
            })
        };

        let Some(property) = enabled_property else {
            return Ok(Box::new(action));
        };
        let Some(setter) = target.bool_property(property) else {
            debug!(
                target_type = type_name,
                property, "enabled property has no setter, binding event only"
            );
            return Ok(Box::new(action));
        };

        let initial = latest.borrow().clone();
        setter.set(command.can_execute(&initial));

        let parameter: ParameterStream = match parameter {
            Some(parameter) => parameter,
            None => Rc::new(Just::new(target_parameter(&target))),
        };
        let tracking = {
            let latest = latest.clone();
            parameter.observe(move |p: &Parameter| *latest.borrow_mut() = p.clone())
        };

        let enabled = {
            let cmd = command.clone();
            command.can_execute_changed().observe(move |_| {
                let param = latest.borrow().clone();
                let can_execute = cmd.can_execute(&param);
                trace!(target_type = type_name, can_execute, "enabled state updated");
                setter.set(can_execute);
            })
        };

        let composite: CompositeDisposable = [
            Box::new(action) as Box<dyn Disposable>,
            Box::new(tracking),
            Box::new(enabled),
        ]
        .into_iter()
        .collect();
        Ok(Box::new(composite))
    }
}

impl CreatesCommandBinding for FlexibleCommandBinder {
    fn affinity_for_object(&self, type_info: &TypeInfo, has_event_target: bool) -> i32 {
        self.affinity_for_type(type_info, has_event_target)
    }

    fn bind_command_to_object(
        &self,
        command: Rc<dyn Command>,
        target: Rc<dyn BindTarget>,
        parameter: Option<ParameterStream>,
    ) -> BindingResult<BindingHandle> {
        self.bind(command, target, parameter)
    }

    fn bind_command_to_event(
        &self,
        _command: Rc<dyn Command>,
        _target: Rc<dyn BindTarget>,
        _parameter: Option<ParameterStream>,
        _event_name: &str,
    ) -> BindingResult<BindingHandle> {
        Err(BindingError::NotImplemented {
            operation: "FlexibleCommandBinder::bind_command_to_event",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::EventStream;
    use rxbind_core::{Observable, Subject, parameter, parameter_as};
    use std::cell::Cell;

    struct WidgetType;
    struct ButtonType;
    struct LabelType;
    static WIDGET: TypeInfo = TypeInfo::of::<WidgetType>("Widget");
    static BUTTON: TypeInfo = TypeInfo::of::<ButtonType>("Button").extends(&WIDGET);
    static LABEL: TypeInfo = TypeInfo::of::<LabelType>("Label");

    struct FakeWidget {
        ty: &'static TypeInfo,
        click: Subject<()>,
        enabled: Option<Rc<RefCell<Vec<bool>>>>,
    }

    impl FakeWidget {
        fn new(ty: &'static TypeInfo) -> Self {
            Self {
                ty,
                click: Subject::new(),
                enabled: Some(Rc::new(RefCell::new(Vec::new()))),
            }
        }

        fn without_enabled(ty: &'static TypeInfo) -> Self {
            Self {
                enabled: None,
                ..Self::new(ty)
            }
        }

        fn enabled_writes(&self) -> Vec<bool> {
            self.enabled
                .as_ref()
                .map(|w| w.borrow().clone())
                .unwrap_or_default()
        }
    }

    impl BindTarget for FakeWidget {
        fn type_info(&self) -> &'static TypeInfo {
            self.ty
        }

        fn event(&self, name: &str) -> Option<EventStream> {
            (name == "Click").then(|| Rc::new(self.click.clone()) as EventStream)
        }

        fn bool_property(&self, name: &str) -> Option<Rc<dyn Settable<bool>>> {
            if name != "Enabled" {
                return None;
            }
            let writes = self.enabled.clone()?;
            Some(Rc::new(move |v: bool| writes.borrow_mut().push(v)))
        }
    }

    struct RecordingCommand {
        executable: Cell<bool>,
        checks: Cell<usize>,
        executed: RefCell<Vec<Parameter>>,
        changed: Subject<()>,
    }

    impl RecordingCommand {
        fn new(executable: bool) -> Rc<Self> {
            Rc::new(Self {
                executable: Cell::new(executable),
                checks: Cell::new(0),
                executed: RefCell::new(Vec::new()),
                changed: Subject::new(),
            })
        }

        fn set_executable(&self, executable: bool) {
            self.executable.set(executable);
            self.changed.emit(&());
        }
    }

    impl Command for RecordingCommand {
        fn can_execute(&self, _parameter: &Parameter) -> bool {
            self.checks.set(self.checks.get() + 1);
            self.executable.get()
        }

        fn execute(&self, parameter: &Parameter) {
            self.executed.borrow_mut().push(parameter.clone());
        }

        fn can_execute_changed(&self) -> &dyn Observable<()> {
            &self.changed
        }
    }

    fn click_binder() -> FlexibleCommandBinder {
        let mut binder = FlexibleCommandBinder::new();
        binder.register(&WIDGET, 5, |command, target, parameter| {
            FlexibleCommandBinder::for_event(command, target, parameter, "Click", Some("Enabled"))
        });
        binder
    }

    #[test]
    fn explicit_event_target_always_has_zero_affinity() {
        let binder = click_binder();
        assert_eq!(binder.affinity_for_type(&BUTTON, true), 0);
        assert_eq!(binder.affinity_for_type(&WIDGET, true), 0);
        assert_eq!(FlexibleCommandBinder::new().affinity_for_type(&WIDGET, true), 0);
    }

    #[test]
    fn incompatible_type_has_zero_affinity_and_fails_to_bind() {
        let binder = click_binder();
        assert_eq!(binder.affinity_for_type(&LABEL, false), 0);

        let err = binder
            .bind(
                RecordingCommand::new(true),
                Rc::new(FakeWidget::new(&LABEL)),
                None,
            )
            .err()
            .expect("label is not bindable");
        match err {
            BindingError::NotSupported { type_name } => assert_eq!(type_name, "Label"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn higher_affinity_subtype_registration_wins() {
        let used = Rc::new(RefCell::new(Vec::new()));
        let mut binder = FlexibleCommandBinder::new();
        for (owner, affinity, tag) in [(&WIDGET, 5, "F1"), (&BUTTON, 10, "F2")] {
            let used = used.clone();
            binder.register(owner, affinity, move |command, target, parameter| {
                used.borrow_mut().push(tag);
                FlexibleCommandBinder::for_event(command, target, parameter, "Click", None)
            });
        }

        assert_eq!(
            binder.find_best_match(&BUTTON).map(|d| d.owner_type()),
            Some(&BUTTON)
        );
        assert_eq!(
            binder.find_best_match(&WIDGET).map(|d| d.owner_type()),
            Some(&WIDGET)
        );
        assert_eq!(binder.affinity_for_type(&BUTTON, false), 10);
        assert_eq!(binder.affinity_for_type(&WIDGET, false), 5);

        let _button = binder
            .bind(RecordingCommand::new(true), Rc::new(FakeWidget::new(&BUTTON)), None)
            .unwrap();
        let _widget = binder
            .bind(RecordingCommand::new(true), Rc::new(FakeWidget::new(&WIDGET)), None)
            .unwrap();

        assert_eq!(*used.borrow(), vec!["F2", "F1"]);
    }

    #[test]
    fn initial_enabled_state_is_written_once() {
        let binder = click_binder();
        let widget = Rc::new(FakeWidget::new(&BUTTON));
        let command = RecordingCommand::new(false);

        let _binding = binder.bind(command.clone(), widget.clone(), None).unwrap();

        assert_eq!(widget.enabled_writes(), vec![false]);
        assert_eq!(command.checks.get(), 1);
    }

    #[test]
    fn trigger_uses_unset_parameter_when_stream_never_emits() {
        let binder = click_binder();
        let widget = Rc::new(FakeWidget::new(&BUTTON));
        let command = RecordingCommand::new(true);
        let silent = Subject::<Parameter>::new();

        let _binding = binder
            .bind(command.clone(), widget.clone(), Some(Rc::new(silent.clone())))
            .unwrap();
        widget.click.emit(&());
        widget.click.emit(&());

        let executed = command.executed.borrow();
        assert_eq!(executed.len(), 2);
        assert!(executed.iter().all(Option::is_none));
        assert_eq!(silent.observer_count(), 1);
    }

    #[test]
    fn trigger_uses_latest_parameter() {
        let binder = click_binder();
        let widget = Rc::new(FakeWidget::new(&BUTTON));
        let command = RecordingCommand::new(true);
        let params = Subject::<Parameter>::new();

        let _binding = binder
            .bind(command.clone(), widget.clone(), Some(Rc::new(params.clone())))
            .unwrap();
        params.emit(&parameter(1_i32));
        params.emit(&parameter(2_i32));
        widget.click.emit(&());

        let executed = command.executed.borrow();
        assert_eq!(executed.len(), 1);
        assert_eq!(parameter_as::<i32>(&executed[0]), Some(&2));
    }

    #[test]
    fn default_parameter_is_the_target_itself() {
        let binder = click_binder();
        let widget = Rc::new(FakeWidget::new(&BUTTON));
        let command = RecordingCommand::new(true);

        let _binding = binder.bind(command.clone(), widget.clone(), None).unwrap();
        widget.click.emit(&());

        let executed = command.executed.borrow();
        let target = parameter_as::<FakeWidget>(&executed[0]).expect("target parameter");
        assert!(std::ptr::eq(target, widget.as_ref()));
    }

    #[test]
    fn trigger_is_ignored_while_not_executable() {
        let binder = click_binder();
        let widget = Rc::new(FakeWidget::new(&BUTTON));
        let command = RecordingCommand::new(false);

        let _binding = binder.bind(command.clone(), widget.clone(), None).unwrap();
        widget.click.emit(&());

        assert!(command.executed.borrow().is_empty());
        assert_eq!(command.checks.get(), 2);
    }

    #[test]
    fn can_execute_changes_are_written_to_enabled_property() {
        let binder = click_binder();
        let widget = Rc::new(FakeWidget::new(&BUTTON));
        let command = RecordingCommand::new(false);

        let _binding = binder.bind(command.clone(), widget.clone(), None).unwrap();
        command.set_executable(true);
        command.set_executable(false);

        assert_eq!(widget.enabled_writes(), vec![false, true, false]);
    }

    #[test]
    fn disposed_binding_stops_all_reactions() {
        let binder = click_binder();
        let widget = Rc::new(FakeWidget::new(&BUTTON));
        let command = RecordingCommand::new(true);

        let binding = binder.bind(command.clone(), widget.clone(), None).unwrap();
        let checks_before = command.checks.get();
        binding.dispose();
        binding.dispose();

        widget.click.emit(&());
        command.set_executable(false);

        assert!(binding.is_disposed());
        assert_eq!(command.checks.get(), checks_before);
        assert!(command.executed.borrow().is_empty());
        assert_eq!(widget.enabled_writes(), vec![true]);
        assert_eq!(widget.click.observer_count(), 0);
        assert_eq!(command.changed.observer_count(), 0);
    }

    #[test]
    fn missing_setter_degrades_to_event_only() {
        let binder = click_binder();
        let widget = Rc::new(FakeWidget::without_enabled(&BUTTON));
        let command = RecordingCommand::new(true);
        let params = Subject::<Parameter>::new();

        let _binding = binder
            .bind(command.clone(), widget.clone(), Some(Rc::new(params.clone())))
            .unwrap();
        params.emit(&parameter("ignored"));
        widget.click.emit(&());

        assert_eq!(params.observer_count(), 0);
        assert_eq!(command.changed.observer_count(), 0);
        assert!(command.executed.borrow()[0].is_none());
    }

    #[test]
    fn missing_enabled_property_name_binds_event_only() {
        let widget: Rc<dyn BindTarget> = Rc::new(FakeWidget::new(&BUTTON));
        let command = RecordingCommand::new(true);

        let _binding =
            FlexibleCommandBinder::for_event(command.clone(), widget, None, "Click", None).unwrap();

        assert_eq!(command.checks.get(), 0);
        assert_eq!(command.changed.observer_count(), 0);
    }

    #[test]
    fn unknown_event_is_reported() {
        let widget: Rc<dyn BindTarget> = Rc::new(FakeWidget::new(&BUTTON));
        let err = FlexibleCommandBinder::for_event(
            RecordingCommand::new(true),
            widget,
            None,
            "LongPress",
            Some("Enabled"),
        )
        .err()
        .expect("no such event");

        assert!(matches!(
            err,
            BindingError::EventNotFound { ref type_name, ref event }
                if type_name == "Button" && event == "LongPress"
        ));
    }

    #[test]
    fn explicit_event_overload_is_not_implemented() {
        let binder = click_binder();
        let err = binder
            .bind_command_to_event(
                RecordingCommand::new(true),
                Rc::new(FakeWidget::new(&BUTTON)),
                None,
                "Click",
            )
            .err()
            .expect("unsupported path");

        assert!(matches!(err, BindingError::NotImplemented { .. }));
    }
}
