use chrono::DateTime;
use chrono_tz::Tz;
use teloxide::utils::command::BotCommands;

use crate::command::Command;
use crate::utils::format_instant;

pub(crate) fn start() -> String {
    "👋 Привет! Я собираю свежие новости из Telegram-каналов и делаю краткую сводку.\n\
     Напишите, за какой период нужны новости, например: «за последние 6 часов» или «за вчера»."
        .to_string()
}

pub(crate) fn help() -> String {
    Command::descriptions().to_string()
}

pub(crate) fn unknown_command() -> String {
    "❌ Неизвестная команда. Напишите запрос обычным текстом, например «за последние 6 часов»."
        .to_string()
}

pub(crate) fn accepted() -> String {
    "✅ Принято! Анализирую запрос...".to_string()
}

pub(crate) fn window_not_understood() -> String {
    "❌ Не удалось понять временной интервал. Попробуйте «за последние 6 часов» или «за вчера»."
        .to_string()
}

pub(crate) fn no_posts(start: DateTime<Tz>, end: DateTime<Tz>) -> String {
    format!(
        "🤷 Новостей с {} по {} не найдено.",
        format_instant(start),
        format_instant(end)
    )
}

pub(crate) fn rate_limited() -> String {
    "⏳ Слишком много запросов. Подождите минуту и попробуйте снова.".to_string()
}

pub(crate) fn internal_error() -> String {
    "❌ Внутренняя ошибка сервиса".to_string()
}
