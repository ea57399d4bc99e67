use use_cases::App;

pub struct UseCaseAppContainer(Box<dyn App>);

impl UseCaseAppContainer {
    pub fn new(app: impl App + 'static) -> Self {
        Self(Box::new(app))
    }

    pub fn get_client(&self) -> &dyn App {
        self.0.as_ref()
    }
}
