//! Display labels for CMS vocabulary keys
//!
//! Target population and involved agents arrive from the CMS as snake_case
//! keys (`personas_mayores`, `administracion_local`). Known keys map to a
//! curated label; anything else is humanized.

/// Curated labels for target population keys
pub const POPULATION_LABELS: &[(&str, &str)] = &[
    ("avd", "Actividades de la Vida Diaria"),
    ("adv", "Actividades de la Vida Diaria"),
    ("abvd", "Actividades Básicas de la Vida Diaria"),
    ("aivd", "Actividades Instrumentales de la Vida Diaria"),
    ("personas_mayores", "Personas Mayores"),
    ("personas_mayores_autonomas", "Personas Mayores Autónomas"),
    ("personas_mayores_dependientes", "Personas Mayores Dependientes"),
    ("personas_con_demencia", "Personas con Demencia"),
    ("personas_con_alzheimer", "Personas con Alzheimer"),
    ("personas_en_soledad", "Personas en Situación de Soledad"),
    ("cuidadores", "Cuidadores"),
    ("cuidadores_familiares", "Cuidadores Familiares"),
    ("cuidadores_profesionales", "Cuidadores Profesionales"),
    ("familiares", "Familiares"),
    ("profesionales", "Profesionales del Sector"),
    ("voluntarios", "Voluntarios"),
    ("comunidad", "Comunidad en General"),
    ("residentes", "Residentes"),
    ("usuarios_centros_dia", "Usuarios de Centros de Día"),
    ("usuarios_sad", "Usuarios de Servicio de Ayuda a Domicilio"),
];

/// Curated labels for involved agent keys
pub const AGENT_LABELS: &[(&str, &str)] = &[
    ("administracion_publica", "Administración Pública"),
    ("administracion_local", "Administración Local"),
    ("administracion_autonomica", "Administración Autonómica"),
    ("administracion_estatal", "Administración Estatal"),
    ("ong", "ONG"),
    ("fundaciones", "Fundaciones"),
    ("asociaciones", "Asociaciones"),
    ("entidades_sociales", "Entidades Sociales"),
    ("empresas", "Empresas"),
    ("cooperativas", "Cooperativas"),
    ("residencias", "Residencias"),
    ("centros_dia", "Centros de Día"),
    ("centros_salud", "Centros de Salud"),
    ("hospitales", "Hospitales"),
    ("centros_sociales", "Centros Sociales"),
    ("trabajadores_sociales", "Trabajadores Sociales"),
    ("profesionales_sanitarios", "Profesionales Sanitarios"),
    ("terapeutas", "Terapeutas"),
    ("psicologos", "Psicólogos"),
    ("fisioterapeutas", "Fisioterapeutas"),
    ("auxiliares", "Auxiliares de Enfermería"),
    ("gerocultores", "Gerocultores"),
    ("voluntariado", "Voluntariado"),
    ("familias", "Familias"),
    ("universidades", "Universidades"),
    ("centros_investigacion", "Centros de Investigación"),
];

/// Display names for categories whose CMS name carries an acronym
pub const CATEGORY_SHORT_NAMES: &[(&str, &str)] = &[
    ("Autonomía y AVD", "Autonomía y Vida Diaria"),
    ("Coordinación del cuidado", "Coordinación del Cuidado"),
    ("Ética y buen trato", "Ética y Buen Trato"),
    ("Inclusión y diversidad", "Inclusión y Diversidad"),
    ("Salud preventiva y AAL", "Salud Preventiva"),
    ("Soledad y Conectividad", "Soledad y Conectividad"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Display name for a category, or the name itself when it has no short form
pub fn category_display_name(name: &str) -> &str {
    CATEGORY_SHORT_NAMES
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| *v)
        .unwrap_or(name)
}

/// Replace underscores with spaces, leaving case untouched
pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
}

/// Label for a population or agent key
///
/// Dictionary lookup is case-insensitive. Unknown keys get underscores
/// replaced by spaces and the first letter of every word uppercased.
pub fn format_label(key: &str) -> String {
    let lower = key.to_lowercase();

    if let Some(label) = lookup(POPULATION_LABELS, &lower).or_else(|| lookup(AGENT_LABELS, &lower)) {
        return label.to_string();
    }

    humanize_key(key)
        .split(' ')
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
