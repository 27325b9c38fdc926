//! Cart and checkout controller.
//!
//! One explicitly constructed state object owns the catalog, the cart, the
//! contact details and the current notification. Front ends call the methods
//! below in response to user actions and re-read state afterwards.

use std::sync::Arc;

use shared::{
    domain::{CartEntry, Lesson, LessonId},
    protocol::OrderRequest,
};
use tracing::{debug, error, info, warn};

use crate::{
    cart::{Cart, Removal},
    catalog::CatalogService,
    error::{CartError, CatalogError},
    notification::Notification,
    pricing::{coupon_discount_rate, PriceBreakdown},
    sorting::{sort_lessons, SortAttribute, SortOrder},
    validation::ContactDetails,
};

pub const NO_RESULTS_MESSAGE: &str = "No results found.";
pub const SEARCH_FAILED_MESSAGE: &str = "Something went wrong. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Catalog,
    Cart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Booked { quantity: u32, spaces_left: u32 },
    SoldOut,
    UnknownLesson,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceSyncFailure {
    pub lesson_id: LessonId,
    pub subject: String,
    pub reason: String,
}

/// Result of persisting every catalog lesson's space count after an order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceSyncReport {
    pub updated: Vec<LessonId>,
    pub failed: Vec<SpaceSyncFailure>,
}

impl SpaceSyncReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Contact details are missing or invalid; nothing was sent.
    Invalid,
    /// The order was not accepted; cart and contact details are kept for a retry.
    Rejected { reason: String },
    Submitted {
        message: String,
        space_sync: SpaceSyncReport,
    },
}

pub struct StorefrontController {
    catalog: Arc<dyn CatalogService>,
    lessons: Vec<Lesson>,
    cart: Cart,
    contact: ContactDetails,
    coupon_code: String,
    discount_rate: f64,
    view: View,
    sort_attribute: SortAttribute,
    sort_order: SortOrder,
    search_query: String,
    search_message: Option<String>,
    notification: Option<Notification>,
}

impl StorefrontController {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog,
            lessons: Vec::new(),
            cart: Cart::default(),
            contact: ContactDetails::default(),
            coupon_code: String::new(),
            discount_rate: 0.0,
            view: View::Catalog,
            sort_attribute: SortAttribute::default(),
            sort_order: SortOrder::default(),
            search_query: String::new(),
            search_message: None,
            notification: None,
        }
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn lesson(&self, lesson_id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| &lesson.id == lesson_id)
    }

    pub fn cart(&self) -> &[CartEntry] {
        self.cart.entries()
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    pub fn coupon_code(&self) -> &str {
        &self.coupon_code
    }

    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn search_message(&self) -> Option<&str> {
        self.search_message.as_deref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn close_notification(&mut self) {
        self.notification = None;
    }

    fn notify(&mut self, notification: Notification) {
        debug!(
            kind = ?notification.kind,
            message = %notification.message,
            "notification raised"
        );
        self.notification = Some(notification);
    }

    /// Replaces the catalog with the service's full lesson list. On failure the
    /// current list is kept.
    pub async fn fetch_catalog(&mut self) -> Result<usize, CatalogError> {
        info!("fetching lessons");
        match self.catalog.fetch_lessons().await {
            Ok(lessons) => {
                info!(count = lessons.len(), "lessons fetched");
                self.lessons = lessons;
                Ok(self.lessons.len())
            }
            Err(err) => {
                error!(error = %err, "error fetching lessons");
                Err(err)
            }
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Replaces the catalog with the lessons matching the stored search query.
    pub async fn search_catalog(&mut self) -> Result<usize, CatalogError> {
        match self.catalog.search_lessons(&self.search_query).await {
            Ok(lessons) => {
                self.search_message = lessons.is_empty().then(|| NO_RESULTS_MESSAGE.to_string());
                info!(query = %self.search_query, count = lessons.len(), "search completed");
                self.lessons = lessons;
                Ok(self.lessons.len())
            }
            Err(err) => {
                error!(query = %self.search_query, error = %err, "error fetching search results");
                self.search_message = Some(SEARCH_FAILED_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    pub fn sort_attribute(&self) -> SortAttribute {
        self.sort_attribute
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_sort_attribute(&mut self, attribute: SortAttribute) {
        self.sort_attribute = attribute;
    }

    pub fn toggle_sort_order(&mut self) {
        self.sort_order = self.sort_order.toggled();
    }

    pub fn sorted_lessons(&self) -> Vec<Lesson> {
        sort_lessons(&self.lessons, self.sort_attribute, self.sort_order)
    }

    /// Moves one space of the lesson into the cart.
    pub fn book_item(&mut self, lesson_id: &LessonId) -> BookingOutcome {
        let Some(lesson) = self.lessons.iter_mut().find(|lesson| &lesson.id == lesson_id) else {
            warn!(%lesson_id, "booking requested for a lesson outside the catalog");
            self.notify(Notification::failure("This lesson is no longer available."));
            return BookingOutcome::UnknownLesson;
        };

        if lesson.spaces == 0 {
            self.notify(Notification::failure(
                "No more spaces available for this lesson.",
            ));
            return BookingOutcome::SoldOut;
        }

        let quantity = self.cart.add(lesson);
        lesson.spaces -= 1;
        let spaces_left = lesson.spaces;
        let message = format!(
            "You have successfully added {} to your cart!",
            lesson.subject
        );
        info!(%lesson_id, quantity, spaces_left, "lesson added to cart");
        self.notify(Notification::success(message));
        BookingOutcome::Booked {
            quantity,
            spaces_left,
        }
    }

    /// Takes one unit off the cart entry at `index` and gives its space back
    /// to the catalog lesson, if that lesson is still listed.
    pub fn remove_from_cart(&mut self, index: usize) -> Result<Removal, CartError> {
        let removal = self.cart.remove_at(index)?;

        match self
            .lessons
            .iter_mut()
            .find(|lesson| &lesson.id == removal.lesson_id())
        {
            Some(lesson) => lesson.spaces += 1,
            None => debug!(
                lesson_id = %removal.lesson_id(),
                "removed lesson is not in the current catalog; space not restored"
            ),
        }

        if self.cart.is_empty() {
            self.view = View::Catalog;
        }
        Ok(removal)
    }

    /// Switches between the catalog and the cart. The cart view is only
    /// entered while the cart has entries.
    pub fn toggle_cart(&mut self) -> View {
        self.view = match self.view {
            View::Catalog if !self.cart.is_empty() => View::Cart,
            _ => View::Catalog,
        };
        self.view
    }

    pub fn apply_coupon(&mut self, code: impl Into<String>) -> bool {
        self.coupon_code = code.into();
        match coupon_discount_rate(&self.coupon_code) {
            Some(rate) => {
                self.discount_rate = rate;
                self.notify(Notification::success("Coupon applied! You got 10% off."));
                true
            }
            None => {
                self.discount_rate = 0.0;
                self.notify(Notification::failure("Invalid coupon code."));
                false
            }
        }
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.contact.set_name(value);
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.contact.set_phone(value);
    }

    pub fn is_checkout_valid(&self) -> bool {
        self.contact.is_checkout_valid()
    }

    pub fn totals(&self) -> PriceBreakdown {
        PriceBreakdown::compute(self.cart.entries(), self.discount_rate)
    }

    pub fn build_order(&self) -> OrderRequest {
        OrderRequest {
            lessons: self.cart.entries().to_vec(),
            name: self.contact.name().to_string(),
            phone: self.contact.phone().to_string(),
            total_amount: self.totals().final_total,
            coupon: self.coupon_code.clone(),
        }
    }

    /// Places the order, then persists every catalog lesson's space count one
    /// request at a time and resynchronises with the service.
    ///
    /// Space updates are best-effort: failures are collected into the returned
    /// report and never undo the order.
    pub async fn submit_order(&mut self) -> CheckoutOutcome {
        if !self.is_checkout_valid() {
            debug!("checkout attempted with invalid contact details");
            return CheckoutOutcome::Invalid;
        }

        let order = self.build_order();
        let ack = match self.catalog.submit_order(&order).await {
            Ok(ack) => ack,
            Err(err) => {
                error!(error = %err, "error submitting order");
                self.notify(Notification::failure(
                    "An error occurred while submitting the order",
                ));
                return CheckoutOutcome::Rejected {
                    reason: err.to_string(),
                };
            }
        };

        let Some(message) = ack.success_message().map(str::to_string) else {
            warn!(response = ?ack.extra, "order response carried no confirmation message");
            self.notify(Notification::failure("Failed to submit order"));
            return CheckoutOutcome::Rejected {
                reason: "order was not confirmed".to_string(),
            };
        };

        info!(
            lessons = order.lessons.len(),
            total = order.total_amount,
            "order submitted"
        );
        self.notify(Notification::success(message.clone()));

        let space_sync = self.sync_lesson_spaces().await;
        if !space_sync.is_complete() {
            warn!(
                failed = space_sync.failed.len(),
                updated = space_sync.updated.len(),
                "order placed but some lesson spaces were not persisted"
            );
            self.notify(Notification::warning(format!(
                "Order placed, but {} lesson(s) could not be updated.",
                space_sync.failed.len()
            )));
        }

        self.cart.clear();
        self.contact.clear();
        self.coupon_code.clear();
        self.discount_rate = 0.0;
        self.view = View::Catalog;
        // The failure is logged inside; local state stays as it is.
        let _ = self.fetch_catalog().await;

        CheckoutOutcome::Submitted {
            message,
            space_sync,
        }
    }

    async fn sync_lesson_spaces(&self) -> SpaceSyncReport {
        let mut report = SpaceSyncReport::default();
        for lesson in &self.lessons {
            match self
                .catalog
                .update_lesson_spaces(&lesson.id, lesson.spaces)
                .await
            {
                Ok(_) => {
                    debug!(
                        lesson = %lesson.subject,
                        spaces = lesson.spaces,
                        "lesson spaces updated"
                    );
                    report.updated.push(lesson.id.clone());
                }
                Err(err) => {
                    error!(lesson = %lesson.subject, error = %err, "failed to update lesson spaces");
                    report.failed.push(SpaceSyncFailure {
                        lesson_id: lesson.id.clone(),
                        subject: lesson.subject.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        report
    }

    /// Persists a single lesson's space count and refreshes the catalog.
    pub async fn update_lesson_spaces(
        &mut self,
        lesson_id: &LessonId,
        spaces: u32,
    ) -> Result<(), CatalogError> {
        match self.catalog.update_lesson_spaces(lesson_id, spaces).await {
            Ok(ack) => {
                let message = ack
                    .success_message()
                    .unwrap_or("Lesson updated.")
                    .to_string();
                self.notify(Notification::success(message));
                let _ = self.fetch_catalog().await;
                Ok(())
            }
            Err(err) => {
                error!(%lesson_id, error = %err, "error updating lesson");
                self.notify(Notification::failure(
                    "An error occurred while updating the lesson.",
                ));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
