//! The route-phase forwarding filter.
//!
//! # Responsibilities
//! - Decide applicability: no pinned backend host, a resolved service id,
//!   and a response still wanted by the pipeline
//! - Translate the inbound request and dispatch it exactly once
//! - Write the backend reply or the classified error into the context
//!
//! # Design Decisions
//! - Stateless apart from the injected client factory and immutable
//!   config; safe to share across request tasks without locking
//! - No internal retry; retry policy belongs to the resilient client

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::client::ClientFactory;
use crate::config::ForwardingConfig;
use crate::context::{ForwardTrace, RequestContext};
use crate::http::{request, response};
use crate::observability::metrics;
use crate::routing::error::GatewayError;
use crate::routing::filter::{Filter, FilterType};

/// Position of this filter within the route phase.
const FILTER_ORDER: i32 = 10;

/// Forwards service-routed requests through the resilient client.
pub struct ForwardingFilter {
    clients: Arc<dyn ClientFactory>,
    config: ForwardingConfig,
}

impl ForwardingFilter {
    pub fn new(clients: Arc<dyn ClientFactory>, config: ForwardingConfig) -> Self {
        Self { clients, config }
    }
}

#[async_trait]
impl Filter for ForwardingFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::Route
    }

    fn filter_order(&self) -> i32 {
        FILTER_ORDER
    }

    fn should_filter(&self, ctx: &RequestContext) -> bool {
        ctx.route_host().is_none() && ctx.service_id().is_some() && ctx.send_response()
    }

    async fn run(&self, ctx: &mut RequestContext) {
        let start = Instant::now();

        let Some(service) = ctx.service_id().map(str::to_owned) else {
            // should_filter gates on this; reaching here without a service
            // id is a pipeline wiring bug
            ctx.record_error(GatewayError::internal("no service id resolved"));
            return;
        };

        let outbound = request::translate(ctx);

        tracing::debug!(
            request_id = %ctx.request_id(),
            service = %service,
            verb = outbound.verb.as_str(),
            path = %outbound.path,
            "forwarding request"
        );

        if self.config.debug_routing {
            ctx.set_trace(ForwardTrace::new(
                &service,
                outbound.verb.as_str(),
                &outbound.path,
                &outbound.query,
                &outbound.headers,
            ));
        }

        let Some(client) = self.clients.client_for(&service) else {
            tracing::error!(
                request_id = %ctx.request_id(),
                service = %service,
                "no client available for service"
            );
            metrics::record_forward_error(&service, "internal", start);
            ctx.record_error(GatewayError::internal(format!(
                "no client available for service {service}"
            )));
            return;
        };

        match client.execute(outbound).await {
            Ok(reply) => {
                if let Some(trace) = ctx.trace_mut() {
                    trace.record_reply(reply.status, &reply.headers);
                }
                if let Some(trace) = ctx.trace() {
                    tracing::debug!(
                        request_id = %ctx.request_id(),
                        trace = %trace.to_json(),
                        "forward trace"
                    );
                }
                metrics::record_forward(&service, reply.status.as_u16(), start);
                response::apply_response(ctx, reply);
            }
            Err(error) => {
                let gateway_error = GatewayError::from_dispatch(error);
                tracing::error!(
                    request_id = %ctx.request_id(),
                    service = %service,
                    cause = gateway_error.cause_code,
                    error = %gateway_error,
                    "forward failed"
                );
                metrics::record_forward_error(&service, gateway_error.cause_code, start);
                ctx.record_error(gateway_error);
            }
        }
    }
}
