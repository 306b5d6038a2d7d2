use rust_decimal::Decimal;
use validator::ValidationError;

// ---
// Validações de formato dos identificadores do domínio.
// Funções puras, usadas pelos payloads via `#[validate(custom(...))]`.
// ---

/// Cédula de identidade: prefixo V ou E, hífen e 7 ou 8 dígitos.
/// Ex.: "V-12345678".
pub fn validate_national_id(value: &str) -> Result<(), ValidationError> {
    let mut parts = value.splitn(2, '-');
    let prefix = parts.next().unwrap_or_default();
    let digits = parts.next().unwrap_or_default();

    let prefix_ok = matches!(prefix, "V" | "E");
    let digits_ok = (7..=8).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit());

    if prefix_ok && digits_ok {
        return Ok(());
    }

    let mut err = ValidationError::new("national_id");
    err.message = Some("Cédula inválida, formato esperado: V-12345678.".into());
    Err(err)
}

/// RIF: letra do tipo de contribuinte (J, G, V, E ou P), 8 dígitos e o
/// dígito verificador. Ex.: "J-12345678-9".
pub fn validate_rif(value: &str) -> Result<(), ValidationError> {
    let mut parts = value.split('-');
    let kind = parts.next().unwrap_or_default();
    let body = parts.next().unwrap_or_default();
    let check = parts.next().unwrap_or_default();
    let trailing = parts.next();

    let kind_ok = matches!(kind, "J" | "G" | "V" | "E" | "P");
    let body_ok = body.len() == 8 && body.bytes().all(|b| b.is_ascii_digit());
    let check_ok = check.len() == 1 && check.bytes().all(|b| b.is_ascii_digit());

    if kind_ok && body_ok && check_ok && trailing.is_none() {
        return Ok(());
    }

    let mut err = ValidationError::new("rif");
    err.message = Some("RIF inválido, formato esperado: J-12345678-9.".into());
    Err(err)
}

/// Telefone nacional: código de área (4 dígitos), hífen e 7 dígitos.
/// Ex.: "0414-1234567".
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let mut parts = value.splitn(2, '-');
    let area = parts.next().unwrap_or_default();
    let number = parts.next().unwrap_or_default();

    let area_ok = area.len() == 4 && area.bytes().all(|b| b.is_ascii_digit());
    let number_ok = number.len() == 7 && number.bytes().all(|b| b.is_ascii_digit());

    if area_ok && number_ok {
        return Ok(());
    }

    let mut err = ValidationError::new("phone");
    err.message = Some("Telefone inválido, formato esperado: 0414-1234567.".into());
    Err(err)
}

pub fn validate_not_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor precisa ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("V-12345678")]
    #[case("V-1234567")]
    #[case("E-7654321")]
    fn national_id_accepts_valid_formats(#[case] value: &str) {
        assert!(validate_national_id(value).is_ok());
    }

    #[rstest]
    #[case("J-12345678")] // prefixo de RIF, não de cédula
    #[case("V12345678")] // sem hífen
    #[case("V-123456")] // poucos dígitos
    #[case("V-123456789")] // dígitos demais
    #[case("V-1234567a")]
    #[case("")]
    fn national_id_rejects_invalid_formats(#[case] value: &str) {
        assert!(validate_national_id(value).is_err());
    }

    #[rstest]
    #[case("J-12345678-9")]
    #[case("G-00000000-0")]
    #[case("P-99999999-1")]
    fn rif_accepts_valid_formats(#[case] value: &str) {
        assert!(validate_rif(value).is_ok());
    }

    #[rstest]
    #[case("X-12345678-9")]
    #[case("J-1234567-9")]
    #[case("J-12345678")] // sem dígito verificador
    #[case("J-12345678-99")]
    #[case("J-12345678-9-1")]
    #[case("")]
    fn rif_rejects_invalid_formats(#[case] value: &str) {
        assert!(validate_rif(value).is_err());
    }

    #[rstest]
    #[case("0414-1234567")]
    #[case("0212-5550001")]
    fn phone_accepts_valid_formats(#[case] value: &str) {
        assert!(validate_phone(value).is_ok());
    }

    #[rstest]
    #[case("414-1234567")]
    #[case("0414-123456")]
    #[case("04141234567")]
    #[case("0414-12345a7")]
    fn phone_rejects_invalid_formats(#[case] value: &str) {
        assert!(validate_phone(value).is_err());
    }
}
