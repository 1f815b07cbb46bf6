/// Generates an instrumented client method that sends a request carrying a
/// oneshot responder and waits for the reply. A closed mailbox or a dropped
/// responder both surface as [`CartError::ProviderClosed`](crate::cart_actor::CartError).
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $crate::cart_actor::CartError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender.send($crate::messages::$request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|e| $crate::cart_actor::CartError::ProviderClosed(e.to_string()))?;

                response.await.map_err(|e| $crate::cart_actor::CartError::ProviderClosed(e.to_string()))?
            }
        }
    };
}
