//! # Persisted Record Shapes
//!
//! Collection names, field names and record structs exactly as they are laid
//! out in the document store. Conversions to and from the API types live
//! beside each record.

use serde::{Deserialize, Serialize};
use shared::{BookingDetail, BookingRequest, Package, RequestKind, UserProfile, UserRole};

pub const USERS: &str = "users";
pub const CALENDARS: &str = "calendarios";
pub const AGENDAS: &str = "agendas";
pub const PACKAGES: &str = "paquetes";
pub const REQUESTS: &str = "solicitudes";

/// Field of `calendarios/{uid}` holding the availability map
pub const AVAILABILITY_FIELD: &str = "estadosDias";
/// Field of `agendas/{uid}` holding the booking detail map
pub const AGENDA_FIELD: &str = "agendas";
/// Field of `paquetes/{uid}` holding the package list
pub const PACKAGES_FIELD: &str = "paquetes";
/// Field of `users/{uid}` used for lookups by email
pub const EMAIL_FIELD: &str = "email";
/// Field of `solicitudes/{id}` naming the addressed DJ
pub const REQUEST_DJ_FIELD: &str = "djId";

/// One entry of the `agendas` map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDetailRecord {
    #[serde(default)]
    pub fecha: String,
    #[serde(default)]
    pub persona: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(default)]
    pub descripcion: String,
}

impl From<BookingDetail> for BookingDetailRecord {
    fn from(detail: BookingDetail) -> Self {
        BookingDetailRecord {
            fecha: detail.date_key,
            persona: detail.contact_person,
            telefono: detail.contact_phone,
            direccion: detail.address,
            descripcion: detail.description,
        }
    }
}

impl BookingDetailRecord {
    /// Older entries may lack `fecha`; the map key is authoritative
    pub fn into_detail(self, date_key: &str) -> BookingDetail {
        BookingDetail {
            date_key: date_key.to_string(),
            contact_person: self.persona,
            contact_phone: self.telefono,
            address: self.direccion,
            description: self.descripcion,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleRecord {
    #[serde(rename = "dj")]
    Dj,
    #[serde(rename = "cliente")]
    Cliente,
    #[serde(rename = "promotor")]
    Promotor,
}

impl From<RoleRecord> for UserRole {
    fn from(role: RoleRecord) -> Self {
        match role {
            RoleRecord::Dj => UserRole::Dj,
            RoleRecord::Cliente => UserRole::Client,
            RoleRecord::Promotor => UserRole::Promoter,
        }
    }
}

impl From<UserRole> for RoleRecord {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Dj => RoleRecord::Dj,
            UserRole::Client => RoleRecord::Cliente,
            UserRole::Promoter => RoleRecord::Promotor,
        }
    }
}

/// Genres were written both as an array and as a comma separated string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenresRecord {
    List(Vec<String>),
    Text(String),
}

impl GenresRecord {
    pub fn into_list(self) -> Vec<String> {
        let raw = match self {
            GenresRecord::List(list) => list,
            GenresRecord::Text(text) => text.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect()
    }
}

/// `users/{uid}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub email: String,
    pub tipo: RoleRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dni: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distrito: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provincia: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departamento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empresa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre_artistico: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generos: Option<GenresRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rider: Option<String>,
}

impl UserRecord {
    /// A record with only the account fields set
    pub fn new(email: &str, role: UserRole) -> Self {
        UserRecord {
            email: email.to_string(),
            tipo: role.into(),
            nombre: None,
            apellido: None,
            dni: None,
            distrito: None,
            provincia: None,
            departamento: None,
            ruc: None,
            empresa: None,
            direccion: None,
            nombre_artistico: None,
            descripcion: None,
            generos: None,
            rider: None,
        }
    }

    pub fn into_profile(self, id: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            email: self.email,
            role: self.tipo.into(),
            first_name: self.nombre,
            last_name: self.apellido,
            district: self.distrito,
            province: self.provincia,
            department: self.departamento,
            company: self.empresa,
            address: self.direccion,
            stage_name: self.nombre_artistico,
            description: self.descripcion,
            genres: self.generos.map(GenresRecord::into_list).unwrap_or_default(),
            rider: self.rider,
        }
    }
}

/// Merge payload for the editable part of a DJ profile
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DjProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_artistico: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rider: Option<String>,
}

/// Prices were entered as free text but some documents hold numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceRecord {
    Text(String),
    Number(f64),
}

/// One entry of `paquetes/{uid}.paquetes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub precio: PriceRecord,
}

impl From<PackageRecord> for Package {
    fn from(record: PackageRecord) -> Self {
        let price = match record.precio {
            PriceRecord::Text(text) => text,
            PriceRecord::Number(number) => number.to_string(),
        };
        Package {
            icon: record.icon,
            title: record.titulo.or(record.nombre).unwrap_or_default(),
            price,
        }
    }
}

impl From<Package> for PackageRecord {
    fn from(package: Package) -> Self {
        PackageRecord {
            icon: package.icon,
            titulo: Some(package.title),
            nombre: None,
            descripcion: None,
            precio: PriceRecord::Text(package.price),
        }
    }
}

/// `solicitudes/{generated}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    pub dj_id: String,
    pub nombre_cliente: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empresa: Option<String>,
    pub tipo_evento: String,
    pub fecha_evento: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lugar_evento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presupuesto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hora_inicio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hora_fin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personas_estimadas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detalles_evento: Option<String>,
    pub telefono: String,
    /// RFC 3339 submission time
    pub fecha: String,
    #[serde(default)]
    pub leido: bool,
    /// `"promotor"` for proposals, absent for client contact requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_solicitud: Option<String>,
}

impl RequestRecord {
    pub fn kind(&self) -> RequestKind {
        match self.tipo_solicitud.as_deref() {
            Some("promotor") => RequestKind::Promoter,
            _ => RequestKind::Client,
        }
    }

    pub fn into_request(self, id: &str) -> BookingRequest {
        BookingRequest {
            id: id.to_string(),
            kind: self.kind(),
            dj_id: self.dj_id,
            sender_name: self.nombre_cliente,
            company: self.empresa,
            event_type: self.tipo_evento,
            event_date: self.fecha_evento,
            venue: self.lugar_evento,
            budget: self.presupuesto,
            start_time: self.hora_inicio,
            end_time: self.hora_fin,
            estimated_guests: self.personas_estimadas,
            details: self.detalles_evento,
            phone: self.telefono,
            sent_at: self.fecha,
            read: self.leido,
        }
    }
}
