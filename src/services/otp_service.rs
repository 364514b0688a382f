//! Generación de códigos de un solo uso
//!
//! Códigos numéricos de longitud fija extraídos uniformemente de
//! `[10^(n-1), 10^n − 1]` con el CSPRNG del sistema operativo, de modo
//! que nunca aparece un cero inicial y el resultado tiene exactamente
//! n dígitos.

use crate::utils::errors::{input_error, AppResult};
use rand::rngs::OsRng;
use rand::Rng;

/// Longitud máxima representable sin desbordar u64
const MAX_OTP_DIGITS: u32 = 18;

/// Generar un código numérico de exactamente `digits` dígitos
pub fn generate_otp(digits: u32) -> AppResult<String> {
    if digits == 0 || digits > MAX_OTP_DIGITS {
        return Err(input_error("OTP length must be between 1 and 18 digits"));
    }

    let lower = 10u64.pow(digits - 1);
    let upper = 10u64.pow(digits) - 1;
    let value = OsRng.gen_range(lower..=upper);

    Ok(value.to_string())
}
