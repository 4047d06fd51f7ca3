//! Push notification stack: SNS topics for the Android device fleet.

use super::template_err;
use async_trait::async_trait;
use cumulus_cloud::{Result as CloudResult, StackModule};
use cumulus_template::{sns, Resource, Result, Template};

pub struct PushNotificationsStack;

#[async_trait]
impl StackModule for PushNotificationsStack {
    fn name(&self) -> &str {
        "pushnotifications"
    }

    fn template_body(&self) -> CloudResult<String> {
        template()
            .and_then(|t| t.to_yaml())
            .map_err(template_err)
    }
}

const TOPICS: &[(&str, &str)] = &[
    ("AndroidDevicesTopic", "devices-android"),
    ("AndroidDevicesEndpointCreatedTopic", "devices-android-created"),
    ("AndroidDevicesEndpointDeletedTopic", "devices-android-deleted"),
    ("AndroidDevicesEndpointUpdatedTopic", "devices-android-updated"),
    (
        "AndroidDevicesDeliveryFailedTopic",
        "devices-android-delivery-failed",
    ),
];

pub fn template() -> Result<Template> {
    let mut t = Template::new().description("SNS topics for Android device notifications.");
    for (logical_id, topic_name) in TOPICS {
        t.add_resource(
            logical_id,
            Resource::new(sns::Topic {
                topic_name: topic_name.to_string(),
            })?,
        )?;
    }
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn declares_all_device_topics() {
        let t = template().unwrap();
        assert_eq!(t.resources().len(), 5);

        let doc = serde_json::to_value(&t).unwrap();
        assert_eq!(
            doc["Resources"]["AndroidDevicesTopic"]["Properties"]["TopicName"],
            json!("devices-android")
        );
        assert_eq!(
            doc["Resources"]["AndroidDevicesDeliveryFailedTopic"]["Properties"]["TopicName"],
            json!("devices-android-delivery-failed")
        );
    }
}
