use calcunotas::calculo::{calcular_semestre, materia_completa};
use calcunotas::models::{Corte, EstadoSemestre, Materia};
use pretty_assertions::assert_eq;

fn completa(id: &str, creditos: u32, nota: f64) -> Materia {
    Materia::new(id, id, creditos, vec![Corte::con_nota(50.0, nota), Corte::con_nota(50.0, nota)])
}

fn incompleta(id: &str) -> Materia {
    Materia::new(id, id, 5, vec![Corte::con_nota(50.0, 5.0), Corte::sin_nota(50.0)])
}

#[test]
fn test_sin_materias() {
    let r = calcular_semestre(&[], true);
    assert_eq!(r.estado, EstadoSemestre::SinMaterias);
    assert_eq!(r.promedio, None);
    assert_eq!((r.incluidas, r.omitidas), (0, 0));
    assert_eq!(r.mensaje, "Agrega al menos una materia.");
}

#[test]
fn test_sin_materias_completas() {
    let r = calcular_semestre(&[incompleta("a"), incompleta("b")], false);
    assert_eq!(r.estado, EstadoSemestre::SinCompletas);
    assert_eq!(r.promedio, None);
    assert_eq!((r.incluidas, r.omitidas), (0, 2));
    assert_eq!(r.mensaje, "Aún no hay materias completas para promediar.");
}

#[test]
fn test_ponderado_por_creditos() {
    let materias = vec![completa("A", 3, 4.0), completa("B", 1, 3.0), incompleta("C")];
    let r = calcular_semestre(&materias, true);
    assert_eq!(r.estado, EstadoSemestre::Ok);
    assert_eq!((r.incluidas, r.omitidas), (2, 1));
    // (4.0*3 + 3.0*1) / 4
    assert_eq!(r.promedio, Some(3.75));
    assert!(r.ponderado_por_creditos);
    assert_eq!(
        r.mensaje,
        "Promedio del semestre: 3.75 (ponderado por créditos). Incluidas: 2. Omitidas: 1."
    );
}

#[test]
fn test_sin_ponderar() {
    let materias = vec![completa("A", 3, 4.0), completa("B", 1, 3.0), incompleta("C")];
    let r = calcular_semestre(&materias, false);
    assert_eq!(r.promedio, Some(3.5));
    assert_eq!(r.mensaje, "Promedio del semestre: 3.50. Incluidas: 2. Omitidas: 1.");
}

#[test]
fn test_cero_creditos_pesa_uno() {
    let materias = vec![completa("A", 0, 4.0), completa("B", 1, 2.0)];
    let r = calcular_semestre(&materias, true);
    assert_eq!(r.promedio, Some(3.0));
    assert_eq!(r.incluidas, 2);
}

#[test]
fn test_pesos_invalidos_excluyen_la_materia() {
    let mala = Materia::new("X", "X", 4, vec![Corte::con_nota(40.0, 5.0), Corte::con_nota(50.0, 5.0)]);
    assert!(!materia_completa(&mala));
    let r = calcular_semestre(&[mala, completa("A", 1, 3.0)], true);
    assert_eq!((r.incluidas, r.omitidas), (1, 1));
    assert_eq!(r.promedio, Some(3.0));
}

#[test]
fn test_completitud() {
    assert!(materia_completa(&completa("A", 1, 0.0)));
    assert!(!materia_completa(&incompleta("B")));
    // corte de peso 0 sin nota sigue dejando la materia incompleta
    let m = Materia::new("C", "C", 1, vec![Corte::con_nota(100.0, 4.0), Corte::sin_nota(0.0)]);
    assert!(!materia_completa(&m));
}
