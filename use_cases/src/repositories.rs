use crate::access_ids::AccessLookupRepo;
use crate::database_health::ConnectionProbeRepo;
use crate::schema::SchemaRepo;
use crate::scores::ScoresRepo;

pub trait Repository:
    AccessLookupRepo + ConnectionProbeRepo + SchemaRepo + ScoresRepo + Clone
{
}

impl<T> Repository for T where
    T: Clone + AccessLookupRepo + ConnectionProbeRepo + SchemaRepo + ScoresRepo
{
}
