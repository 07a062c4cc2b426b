use serde::Deserialize;

fn default_text_input() -> String {
    "World".to_string()
}

#[derive(Deserialize)]
/// Form payload of `POST /submit`.
/// `textinput` falls back to "World" when the field is missing.
pub struct SubmitForm {
    #[serde(default = "default_text_input")]
    pub textinput: String,
}
