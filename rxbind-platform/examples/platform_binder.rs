use rxbind_core::{Parameter, RelayCommand, Subject, parameter, parameter_as};
use rxbind_platform::{
    BindTarget, CommandBinders, EventCommandBinder, EventStream, FlexibleCommandBinder, Settable,
    TypeInfo,
};
use std::cell::Cell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

struct View;
struct SubmitButton {
    click: Subject<()>,
    enabled: Rc<Cell<bool>>,
}

static VIEW: TypeInfo = TypeInfo::of::<View>("View");
static SUBMIT_BUTTON: TypeInfo = TypeInfo::of::<SubmitButton>("SubmitButton")
    .extends(&VIEW)
    .with_events(&["Click"]);

impl BindTarget for SubmitButton {
    fn type_info(&self) -> &'static TypeInfo {
        &SUBMIT_BUTTON
    }

    fn event(&self, name: &str) -> Option<EventStream> {
        (name == "Click").then(|| Rc::new(self.click.clone()) as EventStream)
    }

    fn bool_property(&self, name: &str) -> Option<Rc<dyn Settable<bool>>> {
        let enabled = self.enabled.clone();
        (name == "Enabled").then(|| Rc::new(move |v: bool| enabled.set(v)) as Rc<dyn Settable<bool>>)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut platform = FlexibleCommandBinder::new();
    platform.register(&VIEW, 5, |command, target, parameter| {
        FlexibleCommandBinder::for_event(command, target, parameter, "Click", Some("Enabled"))
    });

    let binders = CommandBinders::new()
        .with(platform)
        .with(EventCommandBinder::default());

    let button = Rc::new(SubmitButton {
        click: Subject::new(),
        enabled: Rc::new(Cell::new(true)),
    });
    let command = Rc::new(
        RelayCommand::new(|p| {
            if let Some(name) = parameter_as::<String>(p) {
                println!("submitted: {name}");
            }
        })
        .with_can_execute(|p| parameter_as::<String>(p).is_some_and(|s| !s.is_empty())),
    );
    let name = Subject::<Parameter>::new();

    let binding = binders.bind(command.clone(), button.clone(), Some(Rc::new(name.clone())), None)?;
    println!("enabled after bind: {}", button.enabled.get());

    name.emit(&parameter(String::from("Alice")));
    command.raise_can_execute_changed();
    println!("enabled after input: {}", button.enabled.get());

    button.click.emit(&());

    drop(binding);
    button.click.emit(&());
    println!("binding released");
    Ok(())
}
