//! Order store
//!
//! Transactional lifecycle workflows over the repository layer: create,
//! apply an action, read, list, archive and restore. Every state change
//! commits atomically — the order row, its items, participant attachments,
//! inventory movements and spawned service records move together or not
//! at all.

use serde_json::Value;
use shared::models::{
    ContactCard, FinalActor, Order, OrderAction, OrderActionRequest, OrderCreate, OrderItem,
    OrderKind, OrderStatus, OrderView, ParticipationType, Role, ServiceRecord,
};
use shared::util::{now_millis, parse_date_millis};
use sqlx::SqlitePool;

use crate::db::repository::{
    self,
    orders::{OrderItemDraft, OrderUpdate},
};
use crate::utils::{AppError, AppResult};

use super::projector::{self, Viewer};
use super::{chain, identity, metadata, policy};

const MAX_TITLE_LEN: usize = 120;
const MAX_NOTES_LEN: usize = 1000;
/// Archived orders become eligible for deletion after 30 days.
const ARCHIVE_RETENTION_MS: i64 = 30 * 24 * 60 * 60 * 1000;

// ========== Read Path ==========

/// Load and project one order for an optional viewer.
pub async fn get_order(
    pool: &SqlitePool,
    order_id: &str,
    viewer: Option<&Viewer>,
) -> AppResult<OrderView> {
    let order = repository::orders::fetch_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;
    let items = repository::orders::fetch_items(pool, order_id).await?;
    let participants = repository::participants::find_by_order(pool, order_id).await?;
    let kind = identity::normalize_kind(&order.order_kind);
    let fulfiller = resolve_fulfiller(pool, kind, &items).await?;

    Ok(projector::project(
        &order,
        &items,
        &participants,
        fulfiller,
        viewer,
    ))
}

/// Non-archived orders visible to a party, newest first, projected for that
/// party. The status filter compares normalized statuses so legacy rows
/// match their canonical token.
pub async fn list_for_party(
    pool: &SqlitePool,
    role: Role,
    code: &str,
    status: Option<OrderStatus>,
    kind: Option<OrderKind>,
) -> AppResult<Vec<OrderView>> {
    let viewer = Viewer {
        role,
        code: code.to_string(),
    };
    let rows = repository::orders::list_for_party(pool, role, code, kind).await?;

    let mut views = Vec::with_capacity(rows.len());
    for order in rows {
        if let Some(wanted) = status
            && identity::normalize_status(&order.status) != wanted
        {
            continue;
        }
        let items = repository::orders::fetch_items(pool, &order.order_id).await?;
        let participants = repository::participants::find_by_order(pool, &order.order_id).await?;
        let order_kind = identity::normalize_kind(&order.order_kind);
        let fulfiller = resolve_fulfiller(pool, order_kind, &items).await?;
        views.push(projector::project(
            &order,
            &items,
            &participants,
            fulfiller,
            Some(&viewer),
        ));
    }
    Ok(views)
}

/// Who ultimately fulfills a service order: the `managed_by` of its first
/// catalog line. Product orders always fulfil through a depot.
async fn resolve_fulfiller(
    pool: &SqlitePool,
    kind: OrderKind,
    items: &[OrderItem],
) -> AppResult<FinalActor> {
    if kind == OrderKind::Product {
        return Ok(FinalActor::Depot);
    }
    if let Some(first) = items.first()
        && let Some(catalog) = repository::catalog::find_by_code(pool, &first.catalog_code).await?
        && let Some(managed_by) = catalog.managed_by.as_deref()
        && let Ok(fulfiller) = managed_by.parse::<FinalActor>()
    {
        return Ok(fulfiller);
    }
    Ok(FinalActor::Coordinator)
}

// ========== Creation ==========

/// Org codes backfilled onto the order row at creation.
#[derive(Debug, Default)]
struct OrgCodes {
    client: Option<String>,
    site: Option<String>,
    contractor: Option<String>,
    coordinator: Option<String>,
    crew: Option<String>,
    depot: Option<String>,
}

impl OrgCodes {
    fn code_for(&self, role: Role) -> Option<String> {
        match role {
            Role::Client => self.client.clone(),
            Role::Site => self.site.clone(),
            Role::Contractor => self.contractor.clone(),
            Role::Coordinator => self.coordinator.clone(),
            Role::FieldCrew => self.crew.clone(),
            Role::Depot => self.depot.clone(),
        }
    }
}

fn default_title(kind: OrderKind) -> &'static str {
    match kind {
        OrderKind::Product => "Product Order",
        OrderKind::Service => "Service Order",
    }
}

fn parse_opt_date(raw: Option<&str>, field: &str) -> AppResult<Option<i64>> {
    match raw.map(str::trim) {
        None => Ok(None),
        Some("") => Ok(None),
        Some(value) => parse_date_millis(value)
            .map(Some)
            .ok_or_else(|| AppError::validation(format!("Unparseable date '{value}' for {field}"))),
    }
}

/// Create an order. Role eligibility is checked by the service facade
/// before anything here runs.
pub async fn create_order(
    pool: &SqlitePool,
    actor_role: Role,
    actor_code: &str,
    payload: &OrderCreate,
) -> AppResult<OrderView> {
    let now = now_millis();
    let kind = payload.order_kind;
    let creator_code = identity::normalize_code(actor_code)
        .ok_or_else(|| AppError::validation("Creator code is required"))?;

    // Payload validation before any write
    if payload.items.is_empty() {
        return Err(AppError::validation("Order requires at least one item"));
    }
    for line in &payload.items {
        if line.quantity <= 0.0 {
            return Err(AppError::validation(format!(
                "Quantity for '{}' must be positive",
                line.catalog_code
            )));
        }
    }
    let title = match payload.title.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => {
            if t.len() > MAX_TITLE_LEN {
                return Err(AppError::validation("Title exceeds 120 characters"));
            }
            t.to_string()
        }
        _ => default_title(kind).to_string(),
    };
    if let Some(notes) = payload.notes.as_deref()
        && notes.len() > MAX_NOTES_LEN
    {
        return Err(AppError::validation("Notes exceed 1000 characters"));
    }
    let expected_date = parse_opt_date(payload.expected_date.as_deref(), "expected_date")?;
    let service_start_date =
        parse_opt_date(payload.service_start_date.as_deref(), "service_start_date")?;

    // Enrich every line from the live catalog; any unknown or unusable
    // item aborts the whole creation
    let mut drafts: Vec<OrderItemDraft> = Vec::with_capacity(payload.items.len());
    let mut total_amount = Some(0.0_f64);
    let mut currency = payload.currency.clone();
    let mut fulfiller_hint: Option<FinalActor> = None;
    for (index, line) in payload.items.iter().enumerate() {
        let code = identity::normalize_code(&line.catalog_code)
            .ok_or_else(|| AppError::validation("Catalog code is required on every line"))?;
        let catalog = repository::catalog::find_by_code(pool, &code)
            .await?
            .ok_or_else(|| AppError::validation(format!("Unknown catalog item '{code}'")))?;
        if !catalog.is_active {
            return Err(AppError::validation(format!(
                "Catalog item '{code}' is not active"
            )));
        }
        if catalog.item_kind != kind.as_str() {
            return Err(AppError::validation(format!(
                "Catalog item '{code}' is not a {} item",
                kind.as_str()
            )));
        }
        if index == 0 {
            fulfiller_hint = catalog.managed_by.as_deref().and_then(|m| m.parse().ok());
        }
        let line_total = catalog.unit_price.map(|price| price * line.quantity);
        total_amount = match (total_amount, line_total) {
            (Some(total), Some(line_total)) => Some(total + line_total),
            _ => None,
        };
        if currency.is_none() {
            currency = catalog.currency.clone();
        }
        drafts.push(OrderItemDraft {
            catalog_code: code,
            name: catalog.name,
            item_kind: catalog.item_kind,
            description: catalog.description,
            quantity: line.quantity,
            unit: catalog.unit,
            unit_price: catalog.unit_price,
            currency: catalog.currency,
            total_price: line_total,
        });
    }

    // Walk the directory from the creator to backfill org columns
    let mut org = backfill_org(pool, actor_role, &creator_code).await?;

    // Destination: explicit, or the creator's site when one is known
    let mut destination: Option<(String, Role)> = match &payload.destination {
        Some(dest) => {
            let code = identity::normalize_code(&dest.code)
                .ok_or_else(|| AppError::validation("Destination code is required"))?;
            Some((code, dest.role))
        }
        None => None,
    };
    if let Some((code, Role::Site)) = &destination {
        if org.site.is_none() {
            org.site = Some(code.clone());
        }
        let site_code = code.clone();
        fill_from_site(pool, &mut org, &site_code).await?;
    }
    if destination.is_none() {
        destination = org.site.clone().map(|code| (code, Role::Site));
    }

    // Product orders are routed to a depot in the creator's pool
    if kind == OrderKind::Product {
        let depot_code = assign_depot(pool, &creator_code, destination.as_ref()).await?;
        org.depot = Some(depot_code);
    }

    let fulfiller = fulfiller_hint.unwrap_or(FinalActor::Coordinator);
    let (status, next_actor_role) = match kind {
        OrderKind::Product => (OrderStatus::PendingWarehouse, Role::Depot),
        OrderKind::Service => chain::initial_stage(actor_role, fulfiller),
    };
    let next_actor_code = org.code_for(next_actor_role);

    // Metadata: caller keys first, then the frozen contact snapshot
    let mut meta = Value::Object(serde_json::Map::new());
    if let Some(extra) = &payload.metadata {
        metadata::merge_extra(&mut meta, extra);
    }
    let creator_contact =
        repository::directory::find_contact(pool, actor_role, &creator_code).await?;
    let destination_contact = match &destination {
        Some((code, role)) => contact_if_resolvable(pool, *role, code).await?,
        None => None,
    };
    if let Some(creator) = creator_contact {
        metadata::record_contacts(
            &mut meta,
            &metadata::ContactsFacet {
                creator,
                destination: destination_contact,
            },
        );
    }

    let seq = repository::sequences::next_order_seq(pool, &creator_code, kind.as_str()).await?;
    let order_id = format!("{creator_code}-{}-{seq:03}", kind.id_infix());

    let order = Order {
        order_id: order_id.clone(),
        order_kind: kind.as_str().to_string(),
        title,
        status: status.as_str().to_string(),
        next_actor_role: Some(next_actor_role.as_str().to_string()),
        next_actor_code: next_actor_code.clone(),
        creator_code: creator_code.clone(),
        creator_role: actor_role.as_str().to_string(),
        client_code: org.client.clone(),
        site_code: org.site.clone(),
        contractor_code: org.contractor.clone(),
        coordinator_code: org.coordinator.clone(),
        crew_code: org.crew.clone(),
        depot_code: org.depot.clone(),
        destination_code: destination.as_ref().map(|(code, _)| code.clone()),
        destination_role: destination
            .as_ref()
            .map(|(_, role)| role.as_str().to_string()),
        requested_date: Some(now),
        expected_date,
        service_start_date,
        delivery_date: None,
        total_amount,
        currency,
        transformed_code: None,
        rejection_reason: None,
        notes: payload.notes.clone(),
        metadata: meta,
        archived_at: None,
        archived_by: None,
        archive_reason: None,
        deletion_scheduled: None,
        restored_at: None,
        restored_by: None,
        created_at: now,
        updated_at: now,
    };

    let mut tx = pool.begin().await?;
    repository::orders::insert(&mut tx, &order).await?;
    for (index, draft) in drafts.iter().enumerate() {
        repository::orders::insert_item(&mut tx, &order_id, (index + 1) as i64, draft).await?;
    }
    repository::participants::upsert(
        &mut *tx,
        &order_id,
        &creator_code,
        actor_role.as_str(),
        ParticipationType::Creator.as_str(),
        now,
    )
    .await?;
    if let Some((code, role)) = &destination
        && *code != creator_code
    {
        repository::participants::upsert(
            &mut *tx,
            &order_id,
            code,
            role.as_str(),
            ParticipationType::Destination.as_str(),
            now,
        )
        .await?;
    }
    if let Some(depot) = &org.depot
        && kind == OrderKind::Product
        && *depot != creator_code
    {
        repository::participants::upsert(
            &mut *tx,
            &order_id,
            depot,
            Role::Depot.as_str(),
            ParticipationType::Actor.as_str(),
            now,
        )
        .await?;
    }
    if let Some(extra) = &payload.participants {
        for (role, raw_code) in extra {
            let Some(code) = identity::normalize_code(raw_code) else {
                continue;
            };
            let participation = if role.is_actor() {
                ParticipationType::Actor
            } else {
                ParticipationType::Watcher
            };
            repository::participants::upsert(
                &mut *tx,
                &order_id,
                &code,
                role.as_str(),
                participation.as_str(),
                now,
            )
            .await?;
        }
    }
    tx.commit().await?;
    tracing::info!(order_id = %order_id, kind = %kind, creator = %creator_code, "Order created");

    let viewer = Viewer {
        role: actor_role,
        code: creator_code,
    };
    get_order(pool, &order_id, Some(&viewer)).await
}

async fn contact_if_resolvable(
    pool: &SqlitePool,
    role: Role,
    code: &str,
) -> AppResult<Option<ContactCard>> {
    Ok(repository::directory::find_contact(pool, role, code).await?)
}

/// Pick the depot that fulfils a product order. An explicit depot
/// destination must sit in the creator's pool; otherwise the first active
/// depot of that pool is selected, operated depots first.
async fn assign_depot(
    pool: &SqlitePool,
    creator_code: &str,
    destination: Option<&(String, Role)>,
) -> AppResult<String> {
    let creator_is_test = identity::is_test_code(creator_code);

    if let Some((code, Role::Depot)) = destination {
        let depot = repository::directory::find_depot(pool, code)
            .await?
            .ok_or_else(|| AppError::validation(format!("Unknown depot '{code}'")))?;
        if !depot.is_active {
            return Err(AppError::validation(format!(
                "Depot '{code}' is not active"
            )));
        }
        if identity::is_test_code(&depot.code) != creator_is_test {
            return Err(AppError::validation(format!(
                "Depot '{}' is not in the creator's pool",
                depot.code
            )));
        }
        return Ok(depot.code);
    }

    let depots = repository::directory::find_active_depots(pool).await?;
    depots
        .into_iter()
        .find(|depot| identity::is_test_code(&depot.code) == creator_is_test)
        .map(|depot| depot.code)
        .ok_or_else(|| AppError::conflict("No active depot available for this order"))
}

async fn backfill_org(pool: &SqlitePool, role: Role, code: &str) -> AppResult<OrgCodes> {
    let mut org = OrgCodes::default();
    match role {
        Role::Site => {
            org.site = Some(code.to_string());
            fill_from_site(pool, &mut org, code).await?;
        }
        Role::FieldCrew => {
            org.crew = Some(code.to_string());
            if let Some(crew) = repository::directory::find_crew(pool, code).await?
                && let Some(site_code) = crew.site_code
            {
                org.site = Some(site_code.clone());
                fill_from_site(pool, &mut org, &site_code).await?;
            }
        }
        Role::Client => {
            org.client = Some(code.to_string());
            fill_from_client(pool, &mut org, code).await?;
        }
        Role::Contractor => {
            org.contractor = Some(code.to_string());
            fill_from_contractor(pool, &mut org, code).await?;
        }
        Role::Coordinator => {
            org.coordinator = Some(code.to_string());
        }
        Role::Depot => {
            org.depot = Some(code.to_string());
        }
    }
    Ok(org)
}

async fn fill_from_site(pool: &SqlitePool, org: &mut OrgCodes, code: &str) -> AppResult<()> {
    if let Some(site) = repository::directory::find_site(pool, code).await? {
        if org.client.is_none() {
            org.client = site.client_code;
        }
        if org.contractor.is_none() {
            org.contractor = site.contractor_code;
        }
        if org.coordinator.is_none() {
            org.coordinator = site.coordinator_code;
        }
    }
    // Site rows may be sparse; finish the walk through the client
    if let Some(client_code) = org.client.clone()
        && (org.contractor.is_none() || org.coordinator.is_none())
    {
        fill_from_client(pool, org, &client_code).await?;
    }
    Ok(())
}

async fn fill_from_client(pool: &SqlitePool, org: &mut OrgCodes, code: &str) -> AppResult<()> {
    if let Some(client) = repository::directory::find_client(pool, code).await?
        && org.contractor.is_none()
    {
        org.contractor = client.contractor_code;
    }
    if let Some(contractor_code) = org.contractor.clone()
        && org.coordinator.is_none()
    {
        fill_from_contractor(pool, org, &contractor_code).await?;
    }
    Ok(())
}

async fn fill_from_contractor(pool: &SqlitePool, org: &mut OrgCodes, code: &str) -> AppResult<()> {
    if let Some(contractor) = repository::directory::find_contractor(pool, code).await?
        && org.coordinator.is_none()
    {
        org.coordinator = contractor.coordinator_code;
    }
    Ok(())
}

// ========== Actions ==========

/// Apply one lifecycle action. Policy decides, then every effect commits
/// in a single transaction.
pub async fn apply_action(
    pool: &SqlitePool,
    actor_role: Role,
    actor_code: &str,
    order_id: &str,
    request: &OrderActionRequest,
) -> AppResult<OrderView> {
    let now = now_millis();
    let actor_code = identity::normalize_code(actor_code)
        .ok_or_else(|| AppError::validation("Actor code is required"))?;

    let order = repository::orders::fetch_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;
    if order.archived_at.is_some() {
        return Err(AppError::not_found(format!("Order {order_id} not found")));
    }

    let kind = identity::normalize_kind(&order.order_kind);
    let status = identity::normalize_status(&order.status);
    let creator_role = identity::normalize_role(&order.creator_role).unwrap_or(Role::Site);
    let items = repository::orders::fetch_items(pool, order_id).await?;
    let fulfiller = resolve_fulfiller(pool, kind, &items).await?;
    let participants = repository::participants::find_by_order(pool, order_id).await?;

    let ctx = policy::ActionContext {
        kind,
        status,
        actor_role,
        creator_role,
        fulfiller,
        is_creator: order.creator_code == actor_code,
        is_participant: participants.iter().any(|p| {
            p.participant_code == actor_code
                && identity::normalize_role(&p.participant_role) == Some(actor_role)
        }),
    };
    policy::authorize(&ctx, request.action).map_err(AppError::forbidden)?;
    let new_status = policy::next_status(&ctx, request.action).map_err(AppError::forbidden)?;

    let reason = request
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());
    if request.action == OrderAction::Reject && reason.is_none() {
        return Err(AppError::validation("Rejection requires a reason"));
    }
    if let Some(notes) = request.notes.as_deref()
        && notes.len() > MAX_NOTES_LEN
    {
        return Err(AppError::validation("Notes exceed 1000 characters"));
    }
    let delivery_override = parse_opt_date(request.delivery_date.as_deref(), "delivery_date")?;

    let mut meta = order.metadata.clone();
    if let Some(extra) = &request.metadata {
        metadata::merge_extra(&mut meta, extra);
    }

    let mut delivery_date: Option<i64> = None;
    let mut transformed_code: Option<String> = None;
    let mut rejection_reason: Option<&str> = None;

    let mut tx = pool.begin().await?;

    match request.action {
        OrderAction::Accept => {
            if kind == OrderKind::Service {
                metadata::append_approval(&mut meta, actor_role.status_token());
                if new_status.is_accepted_stage() {
                    // The fulfiller signed off: mint the service record now
                    let record =
                        ensure_service_record(&mut tx, &order, &items, &actor_code, now).await?;
                    metadata::record_service(&mut meta, &record.service_code, record.created_at);
                    transformed_code = Some(record.service_code);
                }
            }
        }
        OrderAction::CreateService => {
            let record = ensure_service_record(&mut tx, &order, &items, &actor_code, now).await?;
            metadata::record_service(&mut meta, &record.service_code, record.created_at);
            transformed_code = Some(record.service_code);
        }
        OrderAction::StartDelivery => {
            metadata::record_delivery_started(&mut meta, &actor_code, now);
        }
        OrderAction::Deliver => {
            let delivered_at = delivery_override.unwrap_or(now);
            delivery_date = Some(delivered_at);
            metadata::record_delivered(&mut meta, delivered_at);
            let depot = order.depot_code.clone().ok_or_else(|| {
                AppError::conflict(format!("Order {order_id} has no depot for delivery"))
            })?;
            for item in &items {
                repository::inventory::apply_delivery(
                    &mut *tx,
                    &depot,
                    &item.catalog_code,
                    item.quantity,
                )
                .await?;
            }
        }
        OrderAction::Reject => {
            if let Some(reason_text) = reason {
                rejection_reason = Some(reason_text);
                metadata::record_rejection(
                    &mut meta,
                    &metadata::RejectionStamp {
                        code: actor_code.clone(),
                        role: actor_role,
                        at: now,
                        reason: reason_text.to_string(),
                    },
                );
            }
        }
        OrderAction::Cancel => {
            metadata::record_cancellation(
                &mut meta,
                &metadata::CancellationStamp {
                    code: actor_code.clone(),
                    role: actor_role,
                    at: now,
                    reason: reason.map(str::to_string),
                },
            );
        }
    }

    let (next_role, next_code) = next_actor(&order, kind, new_status, fulfiller);
    let update = OrderUpdate {
        status: new_status.as_str(),
        next_actor_role: next_role.map(|r| r.as_str()),
        next_actor_code: next_code.as_deref(),
        rejection_reason,
        notes: request.notes.as_deref(),
        delivery_date,
        transformed_code: transformed_code.as_deref(),
        metadata: &meta,
        updated_at: now,
    };
    repository::orders::update_after_action(&mut tx, order_id, &update).await?;
    repository::participants::upsert(
        &mut *tx,
        order_id,
        &actor_code,
        actor_role.as_str(),
        ParticipationType::Actor.as_str(),
        now,
    )
    .await?;

    tx.commit().await?;
    tracing::info!(order_id = %order_id, action = %request.action, status = %new_status, "Order action applied");

    let viewer = Viewer {
        role: actor_role,
        code: actor_code,
    };
    get_order(pool, order_id, Some(&viewer)).await
}

/// Reuse the order's service record or mint one with a site-scoped code.
async fn ensure_service_record(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    order: &Order,
    items: &[OrderItem],
    created_by: &str,
    now: i64,
) -> AppResult<ServiceRecord> {
    if let Some(existing) = repository::services::find_by_order_tx(tx, &order.order_id).await? {
        return Ok(existing);
    }
    let site_code = order.site_code.clone().ok_or_else(|| {
        AppError::conflict(format!(
            "Order {} has no site for service creation",
            order.order_id
        ))
    })?;
    let seq = repository::sequences::next_service_seq(&mut **tx, &site_code).await?;
    let record = ServiceRecord {
        service_code: format!("{site_code}-SRV-{seq:03}"),
        order_id: order.order_id.clone(),
        site_code,
        catalog_code: items.first().map(|item| item.catalog_code.clone()),
        name: order.title.clone(),
        status: "created".to_string(),
        created_at: now,
        created_by: created_by.to_string(),
    };
    repository::services::insert_if_absent(tx, &record).await?;
    Ok(record)
}

/// Next actor columns for the status an action lands on.
fn next_actor(
    order: &Order,
    kind: OrderKind,
    new_status: OrderStatus,
    fulfiller: FinalActor,
) -> (Option<Role>, Option<String>) {
    if new_status.is_terminal() {
        return (None, None);
    }
    if kind == OrderKind::Product {
        return (
            Some(Role::Depot),
            order.depot_code.clone().or_else(|| order.next_actor_code.clone()),
        );
    }
    if new_status.is_accepted_stage() {
        let role = fulfiller.as_role();
        return (Some(role), order.org_code(role).map(str::to_string));
    }
    match chain::role_waiting_on(new_status) {
        Some(role) => (Some(role), order.org_code(role).map(str::to_string)),
        None => (None, None),
    }
}

// ========== Archive ==========

/// Soft-archive an order; it disappears from listings and gains a deletion
/// window 30 days out.
pub async fn archive_order(
    pool: &SqlitePool,
    actor_role: Role,
    actor_code: &str,
    order_id: &str,
    reason: Option<&str>,
) -> AppResult<OrderView> {
    let now = now_millis();
    let actor_code = identity::normalize_code(actor_code)
        .ok_or_else(|| AppError::validation("Actor code is required"))?;
    let reason = reason.map(str::trim).filter(|r| !r.is_empty());

    repository::orders::archive(
        pool,
        order_id,
        &actor_code,
        reason,
        now,
        now + ARCHIVE_RETENTION_MS,
    )
    .await?;
    tracing::info!(order_id = %order_id, archived_by = %actor_code, "Order archived");

    let viewer = Viewer {
        role: actor_role,
        code: actor_code,
    };
    get_order(pool, order_id, Some(&viewer)).await
}

/// Bring an archived order back into every listing.
pub async fn restore_order(
    pool: &SqlitePool,
    actor_role: Role,
    actor_code: &str,
    order_id: &str,
) -> AppResult<OrderView> {
    let now = now_millis();
    let actor_code = identity::normalize_code(actor_code)
        .ok_or_else(|| AppError::validation("Actor code is required"))?;

    repository::orders::restore(pool, order_id, &actor_code, now).await?;
    tracing::info!(order_id = %order_id, restored_by = %actor_code, "Order restored");

    let viewer = Viewer {
        role: actor_role,
        code: actor_code,
    };
    get_order(pool, order_id, Some(&viewer)).await
}
