use crate::calculo::pesos::{mensaje_pesos_invalidos, validar_pesos};
use crate::calculo::PESO_TOTAL;
use crate::models::{EstadoPromedio, Materia, Nota, ResultadoPromedio};

/// Promedio actual de una materia.
///
/// Solo cuentan los cortes con nota; su peso se re-normaliza sobre el peso
/// ingresado, así que `[50% -> 4.0, 50% -> sin nota]` da 4.0 y no 2.0.
/// Si quedan cortes sin nota el resultado es `ParcialOk`, si no `FinalOk`.
pub fn promedio_materia(materia: &Materia) -> ResultadoPromedio {
    let validacion = validar_pesos(&materia.pesos());
    if !validacion.valido {
        return ResultadoPromedio {
            estado: EstadoPromedio::Error,
            valor: None,
            mensaje: mensaje_pesos_invalidos(validacion.suma),
        };
    }

    let mut acumulado = 0.0;
    let mut peso_usado = 0.0;
    let mut tiene_vacias = false;
    for corte in &materia.cortes {
        let p = corte.peso / PESO_TOTAL;
        match corte.nota {
            Nota::Numerica(n) => {
                acumulado += n * p;
                peso_usado += p;
            }
            Nota::SinNota => tiene_vacias = true,
        }
    }

    if peso_usado == 0.0 {
        return ResultadoPromedio {
            estado: EstadoPromedio::Advertencia,
            valor: None,
            mensaje: "Ingresa al menos una nota.".to_string(),
        };
    }

    let prom = acumulado / peso_usado;
    let (estado, etiqueta) = if tiene_vacias {
        (EstadoPromedio::ParcialOk, "Promedio parcial")
    } else {
        (EstadoPromedio::FinalOk, "Promedio final")
    };
    ResultadoPromedio {
        estado,
        valor: Some(prom),
        mensaje: format!("{}: {:.2}", etiqueta, prom),
    }
}
