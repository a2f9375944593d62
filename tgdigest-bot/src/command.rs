use teloxide::utils::command::BotCommands;

#[derive(BotCommands)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub(crate) enum Command {
    #[command(description = "Показать справку")]
    Help,
    #[command(description = "Запустить бота")]
    Start,
}
