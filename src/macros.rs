/// Generates an async client method that sends a request variant to an actor
/// and awaits its oneshot reply.
///
/// A closed mailbox or a dropped responder maps to the error type's
/// `ActorCommunicationError` variant.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response
                    .await
                    .map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

/// Sends an error on a responder and returns from the enclosing handler.
macro_rules! send_error {
    ($respond_to:expr, $error:expr) => {{
        let _ = $respond_to.send(Err($error));
        return;
    }};
}
