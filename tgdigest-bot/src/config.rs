#[derive(serde::Deserialize)]
pub struct Config {
    pub token: String,
}
