use ts_core::{CharacterStore, Console, Output, create_character};

use super::TemplateArgs;
use crate::console::TerminalConsole;

pub fn run(store: &CharacterStore, args: &TemplateArgs) -> Result<(), String> {
    let template = args.resolve()?;
    let mut console = TerminalConsole;

    let character = create_character(&mut console, &template).map_err(|e| e.to_string())?;
    store
        .save(&character)
        .map_err(|e| format!("cannot write {}: {e}", store.path().display()))?;

    console.show(Output::Info(format!(
        "Character saved to {}",
        store.path().display()
    )));
    Ok(())
}
