//! Turns a game outcome into the chat notification and, on a win, a promo code.

use crate::{
    models::{GameOutcome, Outcome},
    Result,
};

use askama::Template;
use rand::Rng;

pub const PROMO_CODE_MIN: u32 = 10_000;
pub const PROMO_CODE_MAX: u32 = 99_999;

pub const LOSE_MESSAGE: &str = "😔 <b>Проигрыш</b>";
pub const DRAW_MESSAGE: &str = "🤝 <b>Ничья</b>";

/// The promo code comes from the client, so it is escaped for the chat's HTML
/// parse mode.
#[derive(Template)]
#[template(
    source = "🎉 <b>Победа!</b>\nПромокод выдан: <code>{{ promo_code }}</code>",
    ext = "txt",
    escape = "html"
)]
struct WinMessage<'a> {
    promo_code: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// HTML formatted, ready for the chat's HTML parse mode.
    pub message: String,
    pub promo_code: Option<String>,
}

pub fn interpret<R>(outcome: GameOutcome, rng: &mut R) -> Result<Notification>
where
    R: Rng + ?Sized,
{
    let notification = match outcome.result {
        Outcome::Win => {
            // An empty code from the client is as good as none.
            let promo_code = match outcome.promo_code {
                Some(code) if !code.is_empty() => code,
                _ => generate_promo_code(rng),
            };

            let message = WinMessage {
                promo_code: &promo_code,
            }
            .render()?;

            Notification {
                message,
                promo_code: Some(promo_code),
            }
        }
        Outcome::Lose => Notification {
            message: LOSE_MESSAGE.to_string(),
            promo_code: None,
        },
        Outcome::Draw => Notification {
            message: DRAW_MESSAGE.to_string(),
            promo_code: None,
        },
    };

    return Ok(notification);
}

/// Uniform over `[PROMO_CODE_MIN, PROMO_CODE_MAX]`, so always five digits.
pub fn generate_promo_code<R>(rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    return rng.gen_range(PROMO_CODE_MIN..=PROMO_CODE_MAX).to_string();
}
