use crate::calculo::pesos::validar_pesos;
use crate::calculo::PESO_TOTAL;
use crate::models::{EstadoSemestre, Materia, Nota, ResultadoSemestre};

/// Una materia entra al promedio del semestre solo si sus pesos suman 100 y
/// todos sus cortes tienen nota.
pub fn materia_completa(materia: &Materia) -> bool {
    validar_pesos(&materia.pesos()).valido && materia.cortes.iter().all(|c| c.nota.ingresada())
}

/// Promedio final de una materia completa (sin re-normalizar).
fn promedio_final(materia: &Materia) -> f64 {
    materia
        .cortes
        .iter()
        .map(|c| match c.nota {
            Nota::Numerica(n) => n * (c.peso / PESO_TOTAL),
            Nota::SinNota => 0.0,
        })
        .sum()
}

/// Factor de ponderación de una materia. Con créditos nunca baja de 1 para
/// que una materia de 0 créditos no quede fuera.
fn factor(materia: &Materia, ponderar_creditos: bool) -> f64 {
    if ponderar_creditos {
        f64::from(materia.creditos.max(1))
    } else {
        1.0
    }
}

/// Promedio del semestre sobre las materias completas; las incompletas se
/// cuentan como omitidas y no aportan nada.
pub fn calcular_semestre(materias: &[Materia], ponderar_creditos: bool) -> ResultadoSemestre {
    if materias.is_empty() {
        return ResultadoSemestre {
            estado: EstadoSemestre::SinMaterias,
            promedio: None,
            incluidas: 0,
            omitidas: 0,
            ponderado_por_creditos: ponderar_creditos,
            mensaje: "Agrega al menos una materia.".to_string(),
        };
    }

    let mut suma = 0.0;
    let mut peso = 0.0;
    let mut incluidas = 0usize;
    let mut omitidas = 0usize;
    for m in materias {
        if materia_completa(m) {
            let w = factor(m, ponderar_creditos);
            suma += promedio_final(m) * w;
            peso += w;
            incluidas += 1;
        } else {
            omitidas += 1;
        }
    }

    if incluidas == 0 {
        return ResultadoSemestre {
            estado: EstadoSemestre::SinCompletas,
            promedio: None,
            incluidas,
            omitidas,
            ponderado_por_creditos: ponderar_creditos,
            mensaje: "Aún no hay materias completas para promediar.".to_string(),
        };
    }

    let promedio = suma / peso;
    let detalle = if ponderar_creditos { " (ponderado por créditos)" } else { "" };
    ResultadoSemestre {
        estado: EstadoSemestre::Ok,
        promedio: Some(promedio),
        incluidas,
        omitidas,
        ponderado_por_creditos: ponderar_creditos,
        mensaje: format!(
            "Promedio del semestre: {:.2}{}. Incluidas: {}. Omitidas: {}.",
            promedio, detalle, incluidas, omitidas
        ),
    }
}
