use crate::calculo::PESO_TOTAL;
use crate::models::ValidacionPesos;

/// Desviación máxima admitida respecto de 100, expresada en milésimas
/// (estrictamente menor que 0.01).
const TOLERANCIA_MILESIMAS: f64 = 10.0;

/// Suma los porcentajes y comprueba que den 100.
///
/// La suma reportada se redondea a 2 decimales para ocultar el ruido de coma
/// flotante (33.33 + 33.33 + 33.34). La validez se mide sobre la suma sin
/// redondear contada en milésimas: 100.009 es válido, 99.99 y 100.01 no.
pub fn validar_pesos(pesos: &[f64]) -> ValidacionPesos {
    let bruta: f64 = pesos.iter().sum();
    let suma = redondear_2(bruta);
    let desviacion = ((bruta - PESO_TOTAL).abs() * 1000.0).round();
    ValidacionPesos {
        valido: desviacion < TOLERANCIA_MILESIMAS,
        suma,
    }
}

/// Mensaje común para promedio y nota necesaria cuando los pesos no suman 100.
pub(crate) fn mensaje_pesos_invalidos(suma: f64) -> String {
    format!("Los porcentajes suman {}%. Deben ser 100%.", suma)
}

fn redondear_2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
