//! Instruction template wrapped around the user's message.

use minijinja::{Environment, context};

const TEMPLATE_NAME: &str = "chat";

/// Compiled prompt template. `message` is the only variable in scope.
#[derive(Debug)]
pub struct PromptTemplate {
    env: Environment<'static>,
}

impl PromptTemplate {
    /// Compile `source`; syntax errors surface here rather than per request.
    pub fn new(source: impl Into<String>) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template_owned(TEMPLATE_NAME, source.into())?;
        Ok(Self { env })
    }

    pub fn render(&self, message: &str) -> Result<String, minijinja::Error> {
        self.env
            .get_template(TEMPLATE_NAME)?
            .render(context! { message })
    }
}
