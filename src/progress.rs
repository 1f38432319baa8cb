//! Приёмник сообщений о ходе генерации.
//!
//! Генератор не ждёт приёмник и не проверяет результат: сообщения отправляются
//! по принципу "выстрелил и забыл".

/// Получатель названий стадий и долей прогресса.
pub trait ProgressSink: Sync {
    /// Начало новой стадии конвейера.
    fn stage(&self, name: &str);

    /// Доля выполнения текущей стадии в [0, 1]; `None`: стадия завершена
    /// или прогресс неопределён.
    fn progress(&self, fraction: Option<f32>);
}

/// Пересылает всё в фасад `log`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn stage(&self, name: &str) {
        log::info!("▶ {name}");
    }

    fn progress(&self, fraction: Option<f32>) {
        match fraction {
            Some(f) => log::debug!("  {:.1}%", f * 100.0),
            None => log::debug!("  готово"),
        }
    }
}

/// Молча отбрасывает все сообщения.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn stage(&self, _name: &str) {}

    fn progress(&self, _fraction: Option<f32>) {}
}
