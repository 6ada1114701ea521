use crate::calculo::pesos::{mensaje_pesos_invalidos, validar_pesos};
use crate::calculo::{NOTA_MAXIMA, PESO_TOTAL};
use crate::models::{EstadoNecesaria, Materia, Nota, ResultadoNecesaria};

/// Nota promedio que hace falta en los cortes sin nota para llegar a `nota_minima`.
///
/// - Todos los cortes con nota: `YaAsegurada` con el promedio final como valor,
///   alcance o no la meta.
/// - `necesaria > 5`: `Imposible` (el valor lleva la nota que haría falta).
/// - `necesaria <= 0`: `YaAsegurada` sin valor.
/// - En otro caso `Alcanzable` con la nota exacta.
///
/// `nota_minima` no se acota: las comparaciones usan el valor calculado tal cual.
pub fn nota_necesaria(materia: &Materia, nota_minima: f64) -> ResultadoNecesaria {
    let validacion = validar_pesos(&materia.pesos());
    if !validacion.valido {
        return ResultadoNecesaria {
            estado: EstadoNecesaria::Error,
            valor: None,
            mensaje: mensaje_pesos_invalidos(validacion.suma),
        };
    }

    let mut acumulado = 0.0;
    let mut faltante = 0.0;
    for corte in &materia.cortes {
        let p = corte.peso / PESO_TOTAL;
        match corte.nota {
            Nota::Numerica(n) => acumulado += n * p,
            Nota::SinNota => faltante += p,
        }
    }

    if faltante == 0.0 {
        return ResultadoNecesaria {
            estado: EstadoNecesaria::YaAsegurada,
            valor: Some(acumulado),
            mensaje: format!("Ya ingresaste todas las notas. Promedio final: {:.2}", acumulado),
        };
    }

    let necesaria = (nota_minima - acumulado) / faltante;
    if necesaria > NOTA_MAXIMA {
        ResultadoNecesaria {
            estado: EstadoNecesaria::Imposible,
            valor: Some(necesaria),
            mensaje: format!("Necesitarías {:.2}, mayor a 5.0 (imposible).", necesaria),
        }
    } else if necesaria <= 0.0 {
        ResultadoNecesaria {
            estado: EstadoNecesaria::YaAsegurada,
            valor: None,
            mensaje: format!("Con lo que llevas ya aseguras al menos {:.1}.", nota_minima),
        }
    } else {
        ResultadoNecesaria {
            estado: EstadoNecesaria::Alcanzable,
            valor: Some(necesaria),
            mensaje: format!(
                "Necesitas promedio de {:.2} en los cortes restantes para llegar a {:.1}.",
                necesaria, nota_minima
            ),
        }
    }
}
