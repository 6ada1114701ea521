use crate::calculo::{NOTA_MAXIMA, PESO_TOTAL};
use crate::models::{Nota, ValorCrudo};

/// Convierte un valor crudo a número. Vacío, texto no numérico o valores no
/// finitos devuelven `def`. Nunca falla.
pub fn to_num(raw: &ValorCrudo, def: f64) -> f64 {
    match raw {
        ValorCrudo::Vacio => def,
        ValorCrudo::Numero(v) if v.is_finite() => *v,
        ValorCrudo::Numero(_) => def,
        ValorCrudo::Texto(s) => to_num_texto(s, def),
    }
}

/// Variante de `to_num` para texto libre (formularios, variables de entorno).
/// Acepta coma decimal: "3,5" -> 3.5
pub fn to_num_texto(s: &str, def: f64) -> f64 {
    let limpio = s.trim();
    if limpio.is_empty() {
        return def;
    }
    match limpio.replace(',', ".").parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => def,
    }
}

/// Acota `n` al intervalo cerrado `[min, max]`.
pub fn clamp(n: f64, min: f64, max: f64) -> f64 {
    n.max(min).min(max)
}

/// Nota de un corte: vacío => `SinNota`; cualquier otra cosa se coerciona a
/// número (texto no numérico cuenta como 0) y se acota a la escala 0–5.
pub fn nota_desde(raw: &ValorCrudo) -> Nota {
    if raw.esta_vacio() {
        return Nota::SinNota;
    }
    Nota::Numerica(clamp(to_num(raw, 0.0), 0.0, NOTA_MAXIMA))
}

/// Peso de un corte en porcentaje, acotado a [0,100]. Vacío => 0.
pub fn peso_desde(raw: &ValorCrudo) -> f64 {
    clamp(to_num(raw, 0.0), 0.0, PESO_TOTAL)
}
