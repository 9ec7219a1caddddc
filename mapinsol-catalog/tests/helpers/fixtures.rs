//! CMS payloads served by the fake CMS
//!
//! Three practices, newest first:
//! - `red-vecinal` (101): category 29, tag 4, gallery 501/502/999, PDF 503
//! - `cuidadores-en-red` (102): categories 29 and 31, featured
//! - `intercambio-europeo` (103): category 31, tag 7, international

use serde_json::{json, Value};

pub fn practices() -> Vec<Value> {
    vec![
        json!({
            "id": 101,
            "date": "2024-05-10T09:00:00",
            "modified": "2024-06-01T12:30:00",
            "slug": "red-vecinal",
            "status": "publish",
            "link": "https://cms.test/practica/red-vecinal/",
            "title": { "rendered": "Red Vecinal &amp; Soledad" },
            "featured_media": 500,
            "category-practices": [29],
            "tags-practices": [4],
            "meta": {
                "pdf_buena_practica": "503",
                "anexos": ["501", "502", "999"],
                "entidad_responsable": "Fundación Vecinos",
                "url_entidad": "https://vecinos.example.org",
                "personas_de_contacto": {
                    "item-0": {
                        "nombre_contacto": "Ana Pérez",
                        "cargo": "Coordinadora",
                        "entidad_contacto": "Fundación Vecinos",
                        "tlf_contacto": "600000000",
                        "mail_contacto": "ana@vecinos.example.org"
                    }
                },
                "ambito_territorial": "Local",
                "internacional_boolean": "false",
                "country": "España",
                "ccaa": "Asturias",
                "provincia": "Asturias",
                "municipio": "Oviedo",
                "a_o_de_inicio": "2019",
                "estado_actual": "En curso",
                "objetivo_principal": "<p>Reducir la soledad no deseada</p>",
                "poblacion_destinataria": { "personas_mayores": "true", "familias": "false" },
                "agentes_implicados": { "voluntariado": "true" },
                "nivel_de_transferibilidad": "Alta",
                "enlace_video": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
                "enlaces_anexos": [
                    { "texto_enlace": "Memoria 2023", "url_enlace": "https://vecinos.example.org/memoria.pdf" }
                ],
                "practica_destacada": "false",
                "mostrar_contacto": "false"
            },
            "_embedded": {
                "wp:featuredmedia": [{
                    "id": 500,
                    "source_url": "https://cms.test/uploads/cover.jpg",
                    "media_details": { "sizes": {
                        "large": { "source_url": "https://cms.test/uploads/cover-1024.jpg", "width": 1024, "height": 683 }
                    }}
                }],
                "wp:term": [
                    [{ "id": 29, "name": "Soledad y Conectividad", "slug": "soledad", "taxonomy": "category-practices" }],
                    [{ "id": 4, "name": "Rural", "slug": "rural", "taxonomy": "tags-practices" }]
                ]
            }
        }),
        json!({
            "id": 102,
            "date": "2024-03-02T10:00:00",
            "modified": "2024-03-02T10:00:00",
            "slug": "cuidadores-en-red",
            "status": "publish",
            "link": "https://cms.test/practica/cuidadores-en-red/",
            "title": { "rendered": "Cuidadores en Red" },
            "featured_media": 0,
            "category-practices": [29, 31],
            "tags-practices": [],
            "meta": {
                "entidad_responsable": "Asociación Cuidar",
                "ccaa": "Galicia",
                "provincia": "Lugo",
                "a_o_de_inicio": 2021,
                "estado_actual": "Finalizado",
                "agentes_implicados": { "ong": "true", "familias": "true" },
                "practica_destacada": "true",
                "mostrar_contacto": "1",
                "personas_de_contacto": [
                    { "nombre_contacto": "Luis Gómez", "cargo": "Presidente", "mail_contacto": "luis@cuidar.example.org" }
                ]
            },
            "_embedded": {
                "wp:term": [
                    [
                        { "id": 29, "name": "Soledad y Conectividad", "slug": "soledad", "taxonomy": "category-practices" },
                        { "id": 31, "name": "Salud preventiva y AAL", "slug": "salud", "taxonomy": "category-practices" }
                    ],
                    []
                ]
            }
        }),
        json!({
            "id": 103,
            "date": "2023-11-20T08:15:00",
            "modified": "2024-01-05T16:45:00",
            "slug": "intercambio-europeo",
            "status": "publish",
            "link": "https://cms.test/practica/intercambio-europeo/",
            "title": { "rendered": "Intercambio Europeo" },
            "featured_media": 0,
            "category-practices": [31],
            "tags-practices": [7],
            "meta": {
                "entidad_responsable": "Fundación Vecinos",
                "internacional_boolean": "1",
                "country": "Portugal",
                "a_o_de_inicio": "2018",
                "estado_actual": "En pausa",
                "poblacion_destinataria": { "personas_mayores": "true" }
            }
        }),
    ]
}

pub fn categories() -> Vec<Value> {
    vec![
        json!({ "id": 31, "name": "Salud preventiva y AAL", "slug": "salud", "count": 2, "description": "", "link": "https://cms.test/cat/salud/" }),
        json!({ "id": 29, "name": "Soledad y Conectividad", "slug": "soledad", "count": 2, "description": "", "link": "https://cms.test/cat/soledad/" }),
        json!({ "id": 40, "name": "Vivienda", "slug": "vivienda", "count": 0, "description": "", "link": "https://cms.test/cat/vivienda/" }),
    ]
}

pub fn tags() -> Vec<Value> {
    vec![
        json!({ "id": 7, "name": "Europa", "slug": "europa", "count": 1, "description": "", "link": "https://cms.test/tag/europa/" }),
        json!({ "id": 4, "name": "Rural", "slug": "rural", "count": 1, "description": "", "link": "https://cms.test/tag/rural/" }),
    ]
}

pub fn media() -> Vec<Value> {
    vec![
        json!({
            "id": 501,
            "source_url": "https://cms.test/uploads/taller.jpg",
            "alt_text": "Taller de memoria",
            "mime_type": "image/jpeg",
            "media_details": { "width": 1200, "height": 800, "file": "taller.jpg", "sizes": {} }
        }),
        json!({
            "id": 502,
            "source_url": "https://cms.test/uploads/anexo.pdf",
            "alt_text": "",
            "mime_type": "application/pdf",
            "media_details": []
        }),
        json!({
            "id": 503,
            "source_url": "https://cms.test/uploads/buena-practica.pdf",
            "alt_text": "",
            "mime_type": "application/pdf",
            "media_details": []
        }),
    ]
}
