pub mod create;
pub mod play;
pub mod show;

use clap::Args;

use ts_core::CharacterTemplate;

/// Options choosing which attributes character creation asks for.
#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    /// Attribute set: classic (name, gender, race, background), quick
    /// (name, age, description), or custom
    #[arg(short, long, default_value = "classic")]
    pub template: String,

    /// Attribute to ask for, in order (repeatable; implies custom)
    #[arg(short = 'a', long = "attribute")]
    pub attributes: Vec<String>,
}

impl TemplateArgs {
    /// Turn the flags into a template.
    pub fn resolve(&self) -> Result<CharacterTemplate, String> {
        if !self.attributes.is_empty() {
            return Ok(CharacterTemplate::Custom(self.attributes.clone()));
        }
        match self.template.parse::<CharacterTemplate>() {
            Ok(CharacterTemplate::Custom(_)) => {
                Err("the custom template needs at least one --attribute".into())
            }
            Ok(template) => Ok(template),
            Err(e) => Err(e.to_string()),
        }
    }
}
