//! Raw CMS record → `Practice`
//!
//! Every custom field goes through [`MetaBag`]; structural fields (id, slug,
//! dates, taxonomy ids) are read from `RawPractice` directly. Embedded
//! relations fill the cover URL and taxonomy term overlays.

pub mod meta;

pub use meta::{encode_flag, MetaBag};

use chrono::{DateTime, NaiveDateTime};
use mapinsol_common::text::decode_html_entities;

use crate::models::{
    Contact, ExternalLink, MediaDetails, PostStatus, Practice, RawEmbedded, RawEmbeddedMedia,
    RawPractice, Term,
};

/// Taxonomy slug for practice categories
pub const CATEGORY_TAXONOMY: &str = "category-practices";

/// Taxonomy slug for practice tags
pub const TAG_TAXONOMY: &str = "tags-practices";

/// Image renditions tried for the cover, largest first
const COVER_SIZE_CHAIN: &[&str] = &["large", "medium_large", "medium"];

/// Normalize one raw CMS record
pub fn normalize_practice(raw: &RawPractice) -> Practice {
    let meta = MetaBag::new(&raw.meta);

    let mut practice = Practice {
        id: raw.id,
        slug: raw.slug.clone(),
        title: decode_html_entities(&raw.title.rendered),
        status: PostStatus::from(raw.status.as_str()),
        link: raw.link.clone(),
        date_published: raw.date.as_deref().and_then(parse_cms_date),
        date_modified: raw.modified.as_deref().and_then(parse_cms_date),

        featured_media_id: raw.featured_media,
        pdf_id: meta.media_id("pdf_buena_practica"),
        gallery_ids: meta.id_list("anexos"),

        responsible_entity: meta.text("entidad_responsable"),
        entity_url: meta.text("url_entidad"),
        contacts: meta
            .repeater("personas_de_contacto")
            .iter()
            .map(|row| Contact {
                name: row.text("nombre_contacto"),
                role: row.text("cargo"),
                organization: row.text("entidad_contacto"),
                phone: row.text("tlf_contacto"),
                email: row.text("mail_contacto"),
            })
            .collect(),
        territorial_scope: meta.text("ambito_territorial"),
        is_international: meta.flag("internacional_boolean"),
        country: meta.text("country"),
        region: meta.text("ccaa"),
        province: meta.text("provincia"),
        municipality: meta.text("municipio"),
        start_year: meta.text("a_o_de_inicio"),
        current_status: meta.text("estado_actual"),
        setting_type: meta.text("tipo_de_entorno"),

        group_description: meta.text("descripci_n_del_grupo"),
        main_objective: meta.text("objetivo_principal"),
        activities: meta.text("actividades_desarrolladas"),
        methodology: meta.text("metodolog_a_aplicada"),
        target_population: meta.encoded_set("poblacion_destinataria"),
        involved_agents: meta.encoded_set("agentes_implicados"),
        collaborator_name: meta.text("nombre_o_entidad"),
        collaborator_role: meta.text("rol_o_funci_n"),

        evaluation_indicators: meta.text("indicadores_de_evaluaci_n"),
        results: meta.text("resultados_obtenidos"),
        lessons_learned: meta.text("lecciones_aprendidas"),

        transferability_level: meta.text("nivel_de_transferibilidad"),
        implementation_requirements: meta.text("requisitos_de_implementaci_n"),
        sustainability: meta.text("sostenibilidad"),

        dignity_and_autonomy: meta.text("respeto_a_la_dignidad_y_autonom_a"),
        abuse_prevention: meta.text("prevenci_n_del_maltrato"),
        participation: meta.text("participaci_n_de_las_personas"),

        innovative_element: meta.text("elemento_innovador"),
        technology_use: meta.text("uso_de_tecnolog_a"),

        external_publication: meta.text("publicaci_n_externa"),
        video_url: meta.text("enlace_video"),
        external_links: meta
            .repeater("enlaces_anexos")
            .iter()
            .map(|row| ExternalLink {
                label: row.text("texto_enlace"),
                url: row.text("url_enlace"),
            })
            .collect(),

        featured: meta.flag("practica_destacada"),
        show_contact: meta.flag("mostrar_contacto"),

        categories: raw.categories.clone().unwrap_or_default(),
        tags: raw.tags.clone().unwrap_or_default(),

        ..Default::default()
    };

    if let Some(embedded) = &raw.embedded {
        apply_embedded(&mut practice, embedded);
    }

    practice
}

/// Normalize a page of raw records, preserving order
pub fn normalize_all(raws: &[RawPractice]) -> Vec<Practice> {
    raws.iter().map(normalize_practice).collect()
}

fn apply_embedded(practice: &mut Practice, embedded: &RawEmbedded) {
    if let Some(media) = embedded.featured_media.first() {
        practice.featured_media_url = cover_url(media);
    }

    practice.categories_details = embedded_terms(embedded, CATEGORY_TAXONOMY);
    practice.tags_details = embedded_terms(embedded, TAG_TAXONOMY);
}

/// Largest available rendition, falling back to the original file
fn cover_url(media: &RawEmbeddedMedia) -> Option<String> {
    let details: Option<MediaDetails> = media
        .media_details
        .as_ref()
        .filter(|v| v.is_object())
        .and_then(|v| serde_json::from_value(v.clone()).ok());

    let rendition = details.as_ref().and_then(|d| {
        COVER_SIZE_CHAIN
            .iter()
            .filter_map(|size| d.sizes.get(*size))
            .map(|s| s.source_url.as_str())
            .find(|url| !url.is_empty())
    });

    rendition
        .or_else(|| media.source_url.as_deref().filter(|url| !url.is_empty()))
        .map(str::to_string)
}

/// Term group whose first term belongs to `taxonomy`
fn embedded_terms(embedded: &RawEmbedded, taxonomy: &str) -> Option<Vec<Term>> {
    let group = embedded
        .terms
        .iter()
        .find(|group| group.first().map(|t| t.taxonomy.as_str()) == Some(taxonomy))?;

    Some(
        group
            .iter()
            .map(|t| Term {
                id: t.id,
                name: decode_html_entities(&t.name),
                slug: t.slug.clone(),
                description: t.description.clone(),
                link: t.link.clone(),
                count: t.count,
            })
            .collect(),
    )
}

/// CMS local timestamp (`2024-03-15T10:30:00`), or RFC 3339 as a fallback
fn parse_cms_date(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.naive_local()))
}
