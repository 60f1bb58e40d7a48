use ts_core::CharacterStore;

pub fn run(store: &CharacterStore) -> Result<(), String> {
    if !store.exists() {
        println!("No character data found.");
        return Ok(());
    }

    let character = store
        .try_load()
        .map_err(|e| format!("cannot read {}: {e}", store.path().display()))?;

    println!("Character loaded:");
    println!("{character}");
    Ok(())
}
